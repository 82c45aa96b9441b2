use crate::source::Source;

pub mod config;
pub mod error;
pub mod event;
mod message;
#[cfg(feature = "metrics")]
mod metrics;
pub mod populator;
mod producer;
pub mod source;

pub use error::{Error, Result};
pub use event::{Event, EventGenerator};
pub use message::PublishedMessage;
pub use populator::{EventSink, Populator, RunSettings};
pub use producer::Producer;

pub fn local() -> Source {
    Source::Local
}

pub fn brokers(bootstrap_servers: impl Into<String>) -> Source {
    Source::Brokers(bootstrap_servers.into())
}
