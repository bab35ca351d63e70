//! In-memory sink that records what it was sent

use crate::message::TouchMessage;
use crate::sink::{MessageSink, SinkError};

/// Collects messages, optionally disconnecting after a fixed number of sends
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Vec<TouchMessage>,
    /// Sends allowed before the sink reports itself disconnected
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that accepts `n` messages, then fails every further send
    pub fn failing_after(n: usize) -> Self {
        Self {
            messages: Vec::new(),
            fail_after: Some(n),
        }
    }

    pub fn messages(&self) -> &[TouchMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl MessageSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn send(&mut self, message: &TouchMessage) -> Result<(), SinkError> {
        if let Some(limit) = self.fail_after {
            if self.messages.len() >= limit {
                return Err(SinkError::Disconnected(self.name().to_string()));
            }
        }
        self.messages.push(*message);
        Ok(())
    }
}
