//! Outbound `#touch` messages
//!
//! The payload shape is owned by the receiving patch: a receiver symbol,
//! an action tag, a 1-based contact id and the normalized coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Receiver symbol every touch message is addressed to
pub const TOUCH_SYMBOL: &str = "#touch";

/// Logical touch action carried by a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTag {
    Down,
    Up,
    Xy,
}

impl ActionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTag::Down => "down",
            ActionTag::Up => "up",
            ActionTag::Xy => "xy",
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message for one contact point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchMessage {
    pub tag: ActionTag,
    /// Platform pointer id + 1 (0 is never sent)
    pub contact_id: u32,
    pub x: f32,
    pub y: f32,
}

impl TouchMessage {
    pub fn new(tag: ActionTag, contact_id: u32, x: f32, y: f32) -> Self {
        Self {
            tag,
            contact_id,
            x,
            y,
        }
    }

    /// Receiver symbol for this message
    pub fn symbol(&self) -> &'static str {
        TOUCH_SYMBOL
    }
}

impl fmt::Display for TouchMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            TOUCH_SYMBOL, self.tag, self.contact_id, self.x, self.y
        )
    }
}
