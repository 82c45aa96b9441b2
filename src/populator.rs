use crate::error::Result;
use crate::event::{Clock, Event, EventGenerator, IdSource};
use async_trait::async_trait;
use std::io::Write;
use std::time::Duration;

pub const DEFAULT_COUNT: u64 = 2_000_000;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// Destination of rendered events.
#[async_trait]
pub trait EventSink: Send {
    fn dispatch(&mut self, event: &Event, payload: &str) -> Result<()>;

    /// Releases the sink, waiting at most `timeout` for pending work.
    async fn close(&mut self, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub count: u64,
    pub interval: Duration,
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings {
            count: DEFAULT_COUNT,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl RunSettings {
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Generates events and publishes them to a sink at a fixed pace.
pub struct Populator<S, C, I> {
    sink: S,
    generator: EventGenerator<C, I>,
    settings: RunSettings,
}

impl<S, C, I> Populator<S, C, I>
where
    S: EventSink,
    C: Clock,
    I: IdSource,
{
    pub fn new(sink: S, generator: EventGenerator<C, I>, settings: RunSettings) -> Self {
        Populator {
            sink,
            generator,
            settings,
        }
    }

    /// Emits `count` events, echoing each one to `out`, and stops at the first error.
    ///
    /// Returns the number of events emitted.
    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<u64> {
        let mut emitted = 0;
        while emitted < self.settings.count {
            let event = self.generator.generate();
            let payload = event.render();
            self.sink.dispatch(&event, &payload)?;
            writeln!(out, "{}", payload)?;
            emitted += 1;
            tokio::time::sleep(self.settings.interval).await;
        }
        log::info!("Emitted {} event(s)", emitted);
        Ok(emitted)
    }

    /// Releases the sink.
    pub async fn finish(mut self, timeout: Duration) -> Result<S> {
        self.sink.close(timeout).await?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event::{SystemClock, UuidV4};
    use std::io;
    use tokio::time::Instant;

    #[derive(Default)]
    struct Recorder {
        payloads: Vec<String>,
        sent_at: Vec<Instant>,
        fail_at: Option<usize>,
        closed: usize,
    }

    #[async_trait]
    impl EventSink for Recorder {
        fn dispatch(&mut self, _event: &Event, payload: &str) -> Result<()> {
            if self.fail_at == Some(self.payloads.len()) {
                return Err(Error::NoPayload);
            }
            self.payloads.push(payload.to_owned());
            self.sent_at.push(Instant::now());
            Ok(())
        }

        async fn close(&mut self, _timeout: Duration) -> Result<()> {
            self.closed += 1;
            Ok(())
        }
    }

    /// Accepts `lines` complete lines, then fails like a closed pipe.
    struct ClosingPipe {
        written: Vec<u8>,
        lines: usize,
    }

    impl Write for ClosingPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let complete = self.written.iter().filter(|b| **b == b'\n').count();
            if complete >= self.lines {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn populator(sink: Recorder, count: u64) -> Populator<Recorder, SystemClock, UuidV4> {
        Populator::new(
            sink,
            EventGenerator::new(),
            RunSettings::default().with_count(count),
        )
    }

    #[test]
    fn test_default_settings() {
        let settings = RunSettings::default();
        assert_eq!(settings.count, 2_000_000);
        assert_eq!(settings.interval, Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_exactly_count_events() {
        let mut populator = populator(Recorder::default(), 5);
        let mut out = Vec::new();

        let emitted = populator.run(&mut out).await.unwrap();
        assert_eq!(emitted, 5);

        let lines: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect();
        let sink = populator.finish(Duration::from_secs(1)).await.unwrap();
        assert_eq!(lines, sink.payloads);
        assert_eq!(sink.closed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sends_are_paced() {
        let mut populator = populator(Recorder::default(), 4);
        let started = Instant::now();

        populator.run(&mut std::io::sink()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(4 * 2000));

        let sink = populator.finish(Duration::from_secs(1)).await.unwrap();
        for pair in sink.sent_at.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(2000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_error_aborts() {
        let sink = Recorder {
            fail_at: Some(2),
            ..Default::default()
        };
        let mut populator = populator(sink, 10);
        let mut out = Vec::new();

        let res = populator.run(&mut out).await;
        assert!(matches!(res, Err(Error::NoPayload)));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);

        let sink = populator.finish(Duration::from_secs(1)).await.unwrap();
        assert_eq!(sink.payloads.len(), 2);
        assert_eq!(sink.closed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_error_aborts() {
        let mut populator = populator(Recorder::default(), 10);
        let mut out = ClosingPipe {
            written: Vec::new(),
            lines: 2,
        };

        let res = populator.run(&mut out).await;
        assert!(matches!(res, Err(Error::Output(_))));
        assert_eq!(String::from_utf8(out.written).unwrap().lines().count(), 2);

        // The third event was published before its echo failed; nothing after it was.
        let sink = populator.finish(Duration::from_secs(1)).await.unwrap();
        assert_eq!(sink.payloads.len(), 3);
        assert_eq!(sink.closed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_count_emits_nothing() {
        let mut populator = populator(Recorder::default(), 0);
        let mut out = Vec::new();
        assert_eq!(populator.run(&mut out).await.unwrap(), 0);
        assert!(out.is_empty());
    }
}
