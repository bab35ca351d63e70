//! Message sinks - where translated touch messages go
//!
//! The translator does not know how messages reach the patch. Anything that
//! can accept a [`TouchMessage`] synchronously implements [`MessageSink`]:
//! an in-process Pd instance, a service binding, a socket, or the sinks
//! shipped here for logging and testing.

use crate::message::TouchMessage;
use thiserror::Error;

/// Errors a sink may report for a single send attempt
#[derive(Debug, Error)]
pub enum SinkError {
    /// The backing service is gone (unbound, closed, crashed)
    #[error("message sink '{0}' is disconnected")]
    Disconnected(String),

    #[error("I/O error while sending touch message")]
    Io(#[from] std::io::Error),

    #[error("failed to encode touch message")]
    Encode(#[from] serde_json::Error),
}

/// Destination for outbound touch messages
///
/// Failures are returned to the caller as-is. Sinks must not retry on
/// their own.
pub trait MessageSink {
    /// Sink name, for logs
    fn name(&self) -> &str;

    /// Deliver one message
    fn send(&mut self, message: &TouchMessage) -> Result<(), SinkError>;
}

impl<S: MessageSink + ?Sized> MessageSink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(&mut self, message: &TouchMessage) -> Result<(), SinkError> {
        (**self).send(message)
    }
}

pub mod console;
pub mod json;
pub mod recording;

pub use console::ConsoleSink;
pub use json::JsonLinesSink;
pub use recording::RecordingSink;
