//! Scene Touch - multi-touch translation for Pure Data scenes
//!
//! Turns platform touch events into `#touch <tag> <id> <x> <y>` messages,
//! normalized against the displayed scene image.

pub mod config;
pub mod message;
pub mod normalize;
pub mod replay;
pub mod sink;
pub mod touch;
pub mod translator;

pub use message::{ActionTag, TouchMessage, TOUCH_SYMBOL};
pub use sink::{MessageSink, SinkError};
pub use touch::{ActionKind, ImageSize, MotionAction, Pointer, TouchEvent};
pub use translator::{TouchCapability, TouchError, TouchTranslator};
