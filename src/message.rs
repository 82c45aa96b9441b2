use crate::error::{Error, Result};
use crate::producer::Producer;
use chrono::DateTime;
use chrono::Utc;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;
use std::collections::HashMap;

pub(crate) struct Message {
    data: Vec<u8>,
    key: Option<Vec<u8>>,
    timestamp: Option<DateTime<Utc>>,
    properties: HashMap<String, String>,
}

impl Message {
    fn headers(&self) -> Option<OwnedHeaders> {
        if self.properties.is_empty() {
            return None;
        }
        let headers = self
            .properties
            .iter()
            .fold(OwnedHeaders::new(), |headers, (key, value)| {
                headers.insert(Header {
                    key,
                    value: Some(value),
                })
            });
        Some(headers)
    }

    pub(crate) fn record<'a>(&'a self, topic: &'a str) -> FutureRecord<'a, [u8], [u8]> {
        let mut record = FutureRecord::to(topic)
            .payload(self.data.as_slice())
            .timestamp(self.timestamp.unwrap_or_else(Utc::now).timestamp_millis());
        if let Some(key) = &self.key {
            record = record.key(key.as_slice());
        }
        if let Some(headers) = self.headers() {
            record = record.headers(headers);
        }
        record
    }

    pub(crate) async fn send(&self, producer: &Producer) -> Result<()> {
        match producer {
            Producer::Kafka {
                producer,
                topic_name,
                ..
            } => producer
                .send(self.record(topic_name), Timeout::Never)
                .await
                .map(drop)
                .map_err(|(source, _)| Error::Delivery {
                    topic: topic_name.clone(),
                    source,
                }),
        }
    }

    pub(crate) fn enqueue(&self, producer: &Producer) -> Result<()> {
        match producer {
            Producer::Kafka {
                producer,
                topic_name,
                ..
            } => producer
                .send_result(self.record(topic_name))
                .map(drop)
                .map_err(|(source, _)| Error::Enqueue {
                    topic: topic_name.clone(),
                    source,
                }),
        }
    }
}

#[derive(Default)]
pub(crate) struct MessageBuilder {
    data: Option<Result<Vec<u8>>>,
    key: Option<Vec<u8>>,
    properties: HashMap<String, String>,
    timestamp: Option<DateTime<Utc>>,
}

impl MessageBuilder {
    fn build(self) -> Result<Message> {
        let data = self.data.ok_or(Error::NoPayload).and_then(|data| data)?;
        Ok(Message {
            data,
            key: self.key,
            timestamp: self.timestamp,
            properties: self.properties,
        })
    }
}

/// A message under construction, bound to the producer that will publish it.
pub struct PublishedMessage<'a> {
    pub(crate) message: MessageBuilder,
    pub(crate) producer: &'a Producer,
}

impl<'a> PublishedMessage<'a> {
    pub fn text(mut self, text: impl Into<Vec<u8>>) -> Self {
        self.message.data.replace(Ok(text.into()));
        self
    }

    pub fn json(mut self, json: &impl serde::Serialize) -> Self {
        self.message
            .data
            .replace(serde_json::to_vec(json).map_err(Error::from));
        self
    }

    pub fn key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.message.key.replace(key.into());
        self
    }

    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.message.timestamp.replace(ts);
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.message.properties.insert(name.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: impl Iterator<Item = (String, String)>) -> Self {
        for (key, value) in properties {
            self.message.properties.insert(key, value);
        }
        self
    }

    pub(crate) fn build(self) -> Result<Message> {
        self.message.build()
    }

    /// Publishes the message and waits for the broker to acknowledge it.
    pub async fn send(self) -> Result<()> {
        let producer = self.producer;
        let message = self.build()?;
        message.send(producer).await
    }

    /// Hands the message to the client queue without waiting for delivery.
    pub fn enqueue(self) -> Result<()> {
        let producer = self.producer;
        let message = self.build()?;
        let res = message.enqueue(producer);
        #[cfg(feature = "metrics")]
        {
            let labels = [producer.producer_name(), producer.topic_name()];
            if res.is_ok() {
                crate::metrics::NUM_MSGS_QUEUED
                    .with_label_values(&labels)
                    .inc();
            } else {
                crate::metrics::NUM_ENQUEUE_FAILURES
                    .with_label_values(&labels)
                    .inc();
            }
        }
        res
    }
}
