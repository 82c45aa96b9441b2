use crate::error::{Error, Result};
use crate::event::Event;
use crate::message::PublishedMessage;
use crate::populator::EventSink;
use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, Producer as _};
use std::time::Duration;

pub enum Producer {
    Kafka {
        producer_name: String,
        topic_name: String,
        producer: FutureProducer,
    },
}

impl Producer {
    pub fn producer_name(&self) -> &str {
        match self {
            Producer::Kafka { producer_name, .. } => producer_name,
        }
    }

    pub fn topic_name(&self) -> &str {
        match self {
            Producer::Kafka { topic_name, .. } => topic_name,
        }
    }

    /// Messages handed to the client and not yet delivered or failed.
    pub fn in_flight_count(&self) -> i32 {
        match self {
            Producer::Kafka { producer, .. } => producer.in_flight_count(),
        }
    }

    pub fn publish(&self) -> PublishedMessage<'_> {
        PublishedMessage {
            message: Default::default(),
            producer: self,
        }
    }

    /// Waits until every in-flight message is delivered or `timeout` expires.
    pub async fn flush(&self, timeout: Duration) -> Result<()> {
        let res = match self {
            Producer::Kafka { producer, .. } => {
                let client = producer.clone();
                tokio::task::spawn_blocking(move || client.flush(timeout))
                    .await?
                    .map_err(Error::Flush)
            }
        };
        let in_flight = self.in_flight_count();
        if in_flight > 0 {
            log::warn!(
                "{} message(s) still in flight for topic '{}'",
                in_flight,
                self.topic_name()
            );
        }
        res
    }

    fn event_message<'a>(&'a self, event: &Event, payload: &str) -> PublishedMessage<'a> {
        let message = self.publish().text(payload);
        match event.timestamp() {
            Some(ts) => message.timestamp(ts),
            None => message,
        }
    }
}

#[async_trait]
impl EventSink for Producer {
    fn dispatch(&mut self, event: &Event, payload: &str) -> Result<()> {
        self.event_message(event, payload).enqueue()?;
        log::debug!("Enqueued event for topic '{}'", self.topic_name());
        Ok(())
    }

    async fn close(&mut self, timeout: Duration) -> Result<()> {
        log::info!(
            "Flushing producer '{}' (timeout {:?})",
            self.producer_name(),
            timeout
        );
        self.flush(timeout).await
    }
}
