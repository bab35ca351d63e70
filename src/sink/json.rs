//! JSON lines sink
//!
//! Writes each message as one JSON object per line, for piping into
//! whatever actually talks to the patch.

use crate::message::TouchMessage;
use crate::sink::{MessageSink, SinkError};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Line<'a> {
    symbol: &'static str,
    #[serde(flatten)]
    message: &'a TouchMessage,
}

pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn send(&mut self, message: &TouchMessage) -> Result<(), SinkError> {
        let line = Line {
            symbol: message.symbol(),
            message,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ActionTag;
    use serde_json::{json, Value};

    #[test]
    fn test_writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.send(&TouchMessage::new(ActionTag::Down, 1, 1.5, 2.0))
            .unwrap();
        sink.send(&TouchMessage::new(ActionTag::Xy, 2, 3.0, 4.0))
            .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            json!({"symbol": "#touch", "tag": "down", "contact_id": 1, "x": 1.5, "y": 2.0})
        );
        assert_eq!(lines[1]["tag"], "xy");
    }

    #[test]
    fn test_write_failure_is_io_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = JsonLinesSink::new(Closed);
        let err = sink
            .send(&TouchMessage::new(ActionTag::Up, 1, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, SinkError::Io(_) | SinkError::Encode(_)));
    }
}
