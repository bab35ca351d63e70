//! Console sink - logs every touch message for testing and debugging

use crate::message::TouchMessage;
use crate::sink::{MessageSink, SinkError};
use tracing::{debug, info};

/// ConsoleSink logs all touch messages to console/logs
///
/// This is useful for:
/// - Checking a scene's touch mapping without a running patch
/// - Replaying recorded gestures
pub struct ConsoleSink {
    name: String,
    /// Messages sent so far
    sent_count: u64,
}

impl ConsoleSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sent_count: 0,
        }
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count
    }
}

impl MessageSink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&mut self, message: &TouchMessage) -> Result<(), SinkError> {
        self.sent_count += 1;

        info!(
            "👆 [{}] {} → {} [msg #{}]",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.name,
            message,
            self.sent_count
        );

        debug!(
            sink = self.name,
            tag = message.tag.as_str(),
            contact_id = message.contact_id,
            x = message.x,
            y = message.y,
            "ConsoleSink send"
        );

        Ok(())
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        if self.sent_count > 0 {
            info!(
                "🛑 ConsoleSink '{}' closing (sent {} messages)",
                self.name, self.sent_count
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ActionTag;

    #[test]
    fn test_console_sink_counts_messages() {
        let mut sink = ConsoleSink::new("test");
        assert_eq!(sink.name(), "test");

        sink.send(&TouchMessage::new(ActionTag::Down, 1, 0.0, 0.0))
            .unwrap();
        sink.send(&TouchMessage::new(ActionTag::Up, 1, 0.0, 0.0))
            .unwrap();

        assert_eq!(sink.sent_count(), 2);
    }
}
