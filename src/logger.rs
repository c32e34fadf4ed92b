//! Built-in listeners: a tracing logger and a JSON-lines writer.

use crate::event::DeviceChange;
use crate::eventbus::InputListener;
use crate::snapshot::ChannelKind;
use serde::Serialize;
use std::io::Write;
use std::time::Instant;
use tracing::{error, info};

/// Logs every change through `tracing` at `info` level.
#[derive(Debug, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }
}

impl InputListener for Logger {
    fn on_change(&mut self, change: &DeviceChange) {
        info!(
            device = %change.device_id,
            index = change.event.index,
            value = change.event.value,
            kind = ?change.event.kind,
            "input changed"
        );
    }
}

#[derive(Serialize)]
struct Record<'a> {
    device: &'a str,
    index: usize,
    value: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ChannelKind>,
    elapsed_ms: u64,
}

/// Writes one JSON object per change, e.g.
/// `{"device":"native:0","index":3,"value":1.0,"kind":"digital","elapsed_ms":120}`.
///
/// `elapsed_ms` is measured from the writer's creation.
#[derive(Debug)]
pub struct JsonLines<W> {
    out: W,
    started: Instant,
    failures: usize,
}

impl<W: Write> JsonLines<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: Instant::now(),
            failures: 0,
        }
    }

    /// Number of changes that could not be written.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, change: &DeviceChange) -> std::io::Result<()> {
        let record = Record {
            device: &change.device_id,
            index: change.event.index,
            value: change.event.value,
            kind: change.event.kind,
            elapsed_ms: elapsed_ms(self.started, change.at),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Milliseconds from `start` to `at`, saturating at `u64::MAX`.
fn elapsed_ms(start: Instant, at: Instant) -> u64 {
    u64::try_from(at.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX)
}

impl<W: Write + Send> InputListener for JsonLines<W> {
    fn on_change(&mut self, change: &DeviceChange) {
        if let Err(e) = self.write(change) {
            self.failures += 1;
            error!("failed to write change event: {}", e);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::ChangeEvent;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_shape() {
        let mut w = JsonLines::new(Vec::new());
        w.on_change(&DeviceChange::new(
            "native:0",
            ChangeEvent::new(3, 1.0).with_kind(Some(ChannelKind::Digital)),
        ));
        w.on_change(&DeviceChange::new("v", ChangeEvent::new(0, -0.5)));
        let text = String::from_utf8(w.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["device"], "native:0");
        assert_eq!(lines[0]["index"], 3);
        assert_eq!(lines[0]["value"], 1.0);
        assert_eq!(lines[0]["kind"], "digital");
        assert!(lines[0]["elapsed_ms"].is_u64());
        assert!(lines[1].get("kind").is_none());
        assert_eq!(lines[1]["value"], -0.5);
    }

    #[test]
    fn test_elapsed_ms() {
        let start = Instant::now();
        let later = start + std::time::Duration::from_millis(1500);
        assert_eq!(elapsed_ms(start, later), 1500);
        // A change stamped before the writer existed reads as 0.
        assert_eq!(elapsed_ms(later, start), 0);
    }

    #[test]
    fn test_write_failures_are_counted() {
        let mut w = JsonLines::new(Broken);
        w.on_change(&DeviceChange::new("v", ChangeEvent::new(0, 1.0)));
        assert_eq!(w.failures(), 1);
    }
}
