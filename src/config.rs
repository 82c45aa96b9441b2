use crate::populator::{RunSettings, DEFAULT_COUNT};
use clap::Parser;
use log::LevelFilter;
use std::time::Duration;

pub const DEFAULT_TOPIC: &str = "fake-log-topic";
pub const DEFAULT_PRODUCER_NAME: &str = "fakelog";

#[derive(Debug, Parser)]
#[command(name = "fakelog", version, about = "Publishes synthetic JSON events to a Kafka topic")]
#[command(rename_all = "kebab-case")]
pub struct Conf {
    /// Comma separated list of Kafka bootstrap servers
    #[arg(long, env = "FAKELOG_BROKERS", default_value = crate::source::LOCAL_BROKERS)]
    pub brokers: String,

    /// The topic events are published to
    #[arg(long, env = "FAKELOG_TOPIC", default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Client id reported to the brokers
    #[arg(long, env = "FAKELOG_PRODUCER_NAME", default_value = DEFAULT_PRODUCER_NAME)]
    pub producer_name: String,

    /// How many events to publish
    #[arg(long, env = "FAKELOG_COUNT", default_value_t = DEFAULT_COUNT)]
    pub count: u64,

    /// How long to sleep after each event is sent, in milliseconds
    #[arg(long, env = "FAKELOG_INTERVAL_MS", default_value_t = 2000)]
    pub interval_ms: u64,

    /// How long to wait for the brokers to answer at startup, in milliseconds
    #[arg(long, env = "FAKELOG_CONNECT_TIMEOUT_MS", default_value_t = 10_000)]
    pub connect_timeout_ms: u64,

    /// How long to wait for in-flight messages on exit, in milliseconds
    #[arg(long, env = "FAKELOG_FLUSH_TIMEOUT_MS", default_value_t = 10_000)]
    pub flush_timeout_ms: u64,

    /// Extra librdkafka property, as `key=value`. May be repeated.
    #[arg(short = 'X', value_name = "KEY=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, String)>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "FAKELOG_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Conf {
    pub fn build() -> Self {
        Conf::parse()
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings::default()
            .with_count(self.count)
            .with_interval(Duration::from_millis(self.interval_ms))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_millis(self.flush_timeout_ms)
    }
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
