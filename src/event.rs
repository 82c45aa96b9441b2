use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A synthetic log event, as published to the fake topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Milliseconds since the Unix epoch at generation time
    pub time: i64,
    pub zip: Zip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zip {
    pub foo: String,
    pub bar: String,
}

impl Event {
    /// Renders the event in its wire format:
    /// `{ "time": 1000, "zip": { "foo": "AAAA", "bar":"BBBB" } }`
    pub fn render(&self) -> String {
        format!(
            "{{ \"time\": {}, \"zip\": {{ \"foo\": {}, \"bar\":{} }} }}",
            self.time,
            Value::from(self.zip.foo.as_str()),
            Value::from(self.zip.bar.as_str()),
        )
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time).single()
    }
}

pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

pub trait IdSource {
    fn next_id(&mut self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV4;

impl IdSource for UuidV4 {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

pub struct EventGenerator<C = SystemClock, I = UuidV4> {
    clock: C,
    ids: I,
}

impl EventGenerator {
    pub fn new() -> Self {
        EventGenerator {
            clock: SystemClock,
            ids: UuidV4,
        }
    }
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, I: IdSource> EventGenerator<C, I> {
    pub fn with_sources(clock: C, ids: I) -> Self {
        EventGenerator { clock, ids }
    }

    pub fn generate(&mut self) -> Event {
        let time = self.clock.now_millis();
        let foo = self.ids.next_id();
        let bar = self.ids.next_id();
        Event {
            time,
            zip: Zip { foo, bar },
        }
    }
}
