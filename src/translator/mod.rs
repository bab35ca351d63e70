//! Touch translator - turns motion events into `#touch` messages
//!
//! The translator holds one [`TouchStrategy`], chosen once from the platform's
//! [`TouchCapability`] when it is built:
//!
//! - [`MultiTouchStrategy`] understands per-pointer press/release and fans
//!   other actions out to every active contact.
//! - [`SingleTouchStrategy`] reports a single contact only.
//!
//! Each strategy is a classification table: an action maps to an
//! [`ActionTag`] and a [`Scope`] (which pointers get a message). Anything
//! the table does not name releases, so a contact is never left pressed.

mod multi;
mod single;


use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, trace};

use crate::message::{ActionTag, TouchMessage};
use crate::normalize::normalize_point;
use crate::sink::{MessageSink, SinkError};
use crate::touch::{ImageSize, MotionAction, Pointer, TouchEvent};

pub use multi::MultiTouchStrategy;
pub use single::SingleTouchStrategy;

/// First platform API level that reports multiple pointers
pub const MULTI_TOUCH_API_LEVEL: u32 = 5;

/// Input model supported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchCapability {
    #[serde(alias = "multitouch")]
    Multi,
    #[serde(alias = "singletouch")]
    Single,
}

impl TouchCapability {
    /// Capability implied by a platform API level
    pub fn from_api_level(level: u32) -> Self {
        if level >= MULTI_TOUCH_API_LEVEL {
            TouchCapability::Multi
        } else {
            TouchCapability::Single
        }
    }
}

/// Errors from translating or delivering one event
#[derive(Debug, Error)]
pub enum TouchError {
    #[error("pointer index {index} out of range (event has {count} pointers)")]
    PointerIndexOutOfRange { index: usize, count: usize },

    #[error("event has no pointers")]
    NoPointers,

    #[error("pointer id {0} has no contact id")]
    ContactIdOverflow(u32),

    /// The sink rejected a message. `delivered` messages went out before it.
    #[error("send failed after {delivered} of {total} messages")]
    Send {
        delivered: usize,
        total: usize,
        #[source]
        source: SinkError,
    },
}

/// Which contacts an action produces messages for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the pointer at this index
    Pointer(usize),
    /// Every active pointer
    All,
    /// The first pointer, reported as contact 1
    Primary,
}

/// Row of a classification table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tag: ActionTag,
    pub scope: Scope,
}

impl Classification {
    pub fn new(tag: ActionTag, scope: Scope) -> Self {
        Self { tag, scope }
    }
}

/// Maps motion actions to message tags and scopes
pub trait TouchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn capability(&self) -> TouchCapability;

    fn classify(&self, action: MotionAction) -> Classification;
}

/// Stateless translator from touch events to `#touch` messages
pub struct TouchTranslator {
    strategy: Box<dyn TouchStrategy>,
}

impl TouchTranslator {
    /// Build a translator for the given capability.
    ///
    /// The strategy is fixed for the translator's lifetime.
    pub fn new(capability: TouchCapability) -> Self {
        let strategy: Box<dyn TouchStrategy> = match capability {
            TouchCapability::Multi => Box::new(MultiTouchStrategy),
            TouchCapability::Single => Box::new(SingleTouchStrategy),
        };
        info!("Loading {} touch support", strategy.name());
        Self { strategy }
    }

    pub fn capability(&self) -> TouchCapability {
        self.strategy.capability()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Look up the classification row for an action
    pub fn classify(&self, action: MotionAction) -> Classification {
        self.strategy.classify(action)
    }

    /// Translate one event into messages without sending them
    pub fn translate(
        &self,
        event: &TouchEvent,
        image: ImageSize,
    ) -> Result<Vec<TouchMessage>, TouchError> {
        let Classification { tag, scope } = self.strategy.classify(event.action);

        match scope {
            Scope::Pointer(index) => {
                let pointer = event.pointer(index).ok_or(TouchError::PointerIndexOutOfRange {
                    index,
                    count: event.pointer_count(),
                })?;
                Ok(vec![to_message(tag, pointer.id, pointer, image)?])
            }
            Scope::All => event
                .pointers
                .iter()
                .map(|pointer| to_message(tag, pointer.id, pointer, image))
                .collect(),
            Scope::Primary => {
                let pointer = event.pointer(0).ok_or(TouchError::NoPointers)?;
                Ok(vec![to_message(tag, 0, pointer, image)?])
            }
        }
    }

    /// Translate one event and send every resulting message to `sink`.
    ///
    /// Stops at the first failed send; messages sent before it stay sent and
    /// the rest of the event is dropped. Returns the number of messages sent.
    pub fn dispatch<S: MessageSink + ?Sized>(
        &self,
        event: &TouchEvent,
        image: ImageSize,
        sink: &mut S,
    ) -> Result<usize, TouchError> {
        let messages = self.translate(event, image)?;
        let total = messages.len();

        for (delivered, message) in messages.iter().enumerate() {
            trace!(sink = sink.name(), "{}", message);
            sink.send(message).map_err(|source| TouchError::Send {
                delivered,
                total,
                source,
            })?;
        }

        Ok(total)
    }
}

fn to_message(
    tag: ActionTag,
    pointer_id: u32,
    pointer: &Pointer,
    image: ImageSize,
) -> Result<TouchMessage, TouchError> {
    let contact_id = pointer_id
        .checked_add(1)
        .ok_or(TouchError::ContactIdOverflow(pointer_id))?;
    let (x, y) = normalize_point(pointer, image);
    Ok(TouchMessage::new(tag, contact_id, x, y))
}
