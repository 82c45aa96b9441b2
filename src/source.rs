use crate::error::{Error, Result};
use crate::producer::Producer;
use rdkafka::producer::{FutureProducer, Producer as _};
use rdkafka::ClientConfig;
use std::time::Duration;

pub const LOCAL_BROKERS: &str = "127.0.0.1:9092";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local,
    Brokers(String),
}

impl Source {
    pub fn bootstrap_servers(&self) -> &str {
        match self {
            Source::Local => LOCAL_BROKERS,
            Source::Brokers(brokers) => brokers,
        }
    }

    pub fn kafka(self) -> ClientSpec {
        ClientSpec {
            source: self,
            options: Vec::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

pub struct ClientSpec {
    source: Source,
    options: Vec<(String, String)>,
    connect_timeout: Duration,
}

impl ClientSpec {
    /// Passes a raw librdkafka property through to the client.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = (String, String)>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn client_config(&self, producer_name: &str) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", self.source.bootstrap_servers())
            .set("client.id", producer_name);
        for (key, value) in &self.options {
            config.set(key, value);
        }
        config
    }

    /// Creates a producer for `topic_name` and checks that the brokers answer.
    pub async fn producer(self, topic_name: &str, producer_name: &str) -> Result<Producer> {
        let producer: FutureProducer = self
            .client_config(producer_name)
            .create()
            .map_err(Error::Client)?;

        let probe = producer.clone();
        let topic = topic_name.to_owned();
        let timeout = self.connect_timeout;
        tokio::task::spawn_blocking(move || {
            probe
                .client()
                .fetch_metadata(Some(topic.as_str()), timeout)
                .map(drop)
        })
        .await?
        .map_err(|source| Error::Connect {
            brokers: self.source.bootstrap_servers().to_owned(),
            source,
        })?;

        log::info!(
            "Connected to {} as '{}', publishing to '{}'",
            self.source.bootstrap_servers(),
            producer_name,
            topic_name
        );
        Ok(Producer::Kafka {
            producer_name: producer_name.to_owned(),
            topic_name: topic_name.to_owned(),
            producer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_bootstrap_servers() {
        assert_eq!(crate::local().bootstrap_servers(), LOCAL_BROKERS);
        assert_eq!(
            crate::brokers("kafka-1:9092,kafka-2:9092").bootstrap_servers(),
            "kafka-1:9092,kafka-2:9092"
        );
    }

    #[test]
    fn test_client_config_applies_options() {
        let spec = crate::brokers("kafka:9092")
            .kafka()
            .option("linger.ms", "5")
            .options(vec![("acks".to_owned(), "1".to_owned())]);
        let config = spec.client_config("gen");
        assert_eq!(config.get("bootstrap.servers"), Some("kafka:9092"));
        assert_eq!(config.get("client.id"), Some("gen"));
        assert_eq!(config.get("linger.ms"), Some("5"));
        assert_eq!(config.get("acks"), Some("1"));
    }

    #[tokio::test]
    async fn test_invalid_option_is_client_error() {
        let res = crate::local()
            .kafka()
            .option("no.such.property", "1")
            .producer("topic", "gen")
            .await;
        assert!(matches!(res, Err(Error::Client(_))));
    }

    #[tokio::test]
    async fn test_unreachable_brokers_fail_to_connect() {
        let res = crate::brokers("127.0.0.1:1")
            .kafka()
            .connect_timeout(Duration::from_millis(500))
            .producer("topic", "gen")
            .await;
        match res {
            Err(Error::Connect { brokers, .. }) => assert_eq!(brokers, "127.0.0.1:1"),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("connected to an unreachable broker"),
        }
    }
}
