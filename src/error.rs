use rdkafka::error::KafkaError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Couldn't create the Kafka client: {0}")]
    Client(#[source] KafkaError),

    #[error("Brokers at '{brokers}' are unreachable: {source}")]
    Connect {
        brokers: String,
        #[source]
        source: KafkaError,
    },

    #[error("No data set")]
    NoPayload,

    #[error("Couldn't serialize message payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cannot enqueue message for topic '{topic}': {source}")]
    Enqueue {
        topic: String,
        #[source]
        source: KafkaError,
    },

    #[error("Delivery to topic '{topic}' failed: {source}")]
    Delivery {
        topic: String,
        #[source]
        source: KafkaError,
    },

    #[error("Flush did not complete: {0}")]
    Flush(#[source] KafkaError),

    #[error("Couldn't write event to output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Runtime(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
