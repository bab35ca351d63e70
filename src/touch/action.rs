//! Motion action decoding
//!
//! Platform motion events pack the action kind into the low byte of the
//! action word and, for pointer-specific actions, the index of the pointer
//! that triggered it into the second byte.

use std::fmt;
use std::str::FromStr;

pub const ACTION_MASK: u32 = 0x00ff;
pub const ACTION_POINTER_INDEX_MASK: u32 = 0xff00;
pub const ACTION_POINTER_INDEX_SHIFT: u32 = 8;

pub const ACTION_DOWN: u32 = 0;
pub const ACTION_UP: u32 = 1;
pub const ACTION_MOVE: u32 = 2;
pub const ACTION_CANCEL: u32 = 3;
pub const ACTION_OUTSIDE: u32 = 4;
pub const ACTION_POINTER_DOWN: u32 = 5;
pub const ACTION_POINTER_UP: u32 = 6;

/// Kind of motion action, as decoded from the low byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// First contact pressed
    Down,
    /// Last contact released
    Up,
    Move,
    Cancel,
    Outside,
    /// Additional contact pressed while others are down
    PointerDown,
    /// One of several contacts released
    PointerUp,
    /// Any code this crate has no name for
    Other(u8),
}

impl ActionKind {
    pub fn from_code(code: u8) -> Self {
        match code as u32 {
            ACTION_DOWN => ActionKind::Down,
            ACTION_UP => ActionKind::Up,
            ACTION_MOVE => ActionKind::Move,
            ACTION_CANCEL => ActionKind::Cancel,
            ACTION_OUTSIDE => ActionKind::Outside,
            ACTION_POINTER_DOWN => ActionKind::PointerDown,
            ACTION_POINTER_UP => ActionKind::PointerUp,
            _ => ActionKind::Other(code),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            ActionKind::Down => ACTION_DOWN as u8,
            ActionKind::Up => ACTION_UP as u8,
            ActionKind::Move => ACTION_MOVE as u8,
            ActionKind::Cancel => ACTION_CANCEL as u8,
            ActionKind::Outside => ACTION_OUTSIDE as u8,
            ActionKind::PointerDown => ACTION_POINTER_DOWN as u8,
            ActionKind::PointerUp => ACTION_POINTER_UP as u8,
            ActionKind::Other(code) => *code,
        }
    }

    /// Whether the action names a single pointer by index
    pub fn is_pointer_action(&self) -> bool {
        matches!(self, ActionKind::PointerDown | ActionKind::PointerUp)
    }

    /// All named kinds, in code order
    pub fn named() -> [ActionKind; 7] {
        [
            ActionKind::Down,
            ActionKind::Up,
            ActionKind::Move,
            ActionKind::Cancel,
            ActionKind::Outside,
            ActionKind::PointerDown,
            ActionKind::PointerUp,
        ]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Down => f.write_str("down"),
            ActionKind::Up => f.write_str("up"),
            ActionKind::Move => f.write_str("move"),
            ActionKind::Cancel => f.write_str("cancel"),
            ActionKind::Outside => f.write_str("outside"),
            ActionKind::PointerDown => f.write_str("pointer_down"),
            ActionKind::PointerUp => f.write_str("pointer_up"),
            ActionKind::Other(code) => write!(f, "other({})", code),
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "down" => Ok(ActionKind::Down),
            "up" => Ok(ActionKind::Up),
            "move" => Ok(ActionKind::Move),
            "cancel" => Ok(ActionKind::Cancel),
            "outside" => Ok(ActionKind::Outside),
            "pointer_down" => Ok(ActionKind::PointerDown),
            "pointer_up" => Ok(ActionKind::PointerUp),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Decoded action word: kind plus the index of the acting pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionAction {
    pub kind: ActionKind,
    /// Index into the event's pointers (only meaningful for pointer actions)
    pub pointer_index: usize,
}

impl MotionAction {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            pointer_index: 0,
        }
    }

    pub fn pointer_down(index: usize) -> Self {
        Self {
            kind: ActionKind::PointerDown,
            pointer_index: index,
        }
    }

    pub fn pointer_up(index: usize) -> Self {
        Self {
            kind: ActionKind::PointerUp,
            pointer_index: index,
        }
    }

    /// Decode a packed platform action word
    pub fn from_raw(action: u32) -> Self {
        let kind = ActionKind::from_code((action & ACTION_MASK) as u8);
        let pointer_index =
            ((action & ACTION_POINTER_INDEX_MASK) >> ACTION_POINTER_INDEX_SHIFT) as usize;
        Self {
            kind,
            pointer_index,
        }
    }

    /// Pack back into a platform action word
    pub fn to_raw(&self) -> u32 {
        let index = (self.pointer_index as u32) << ACTION_POINTER_INDEX_SHIFT;
        (index & ACTION_POINTER_INDEX_MASK) | self.kind.code() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_simple_actions() {
        assert_eq!(MotionAction::from_raw(0).kind, ActionKind::Down);
        assert_eq!(MotionAction::from_raw(1).kind, ActionKind::Up);
        assert_eq!(MotionAction::from_raw(2).kind, ActionKind::Move);
        assert_eq!(MotionAction::from_raw(3).kind, ActionKind::Cancel);
    }

    #[test]
    fn test_from_raw_pointer_down_with_index() {
        // Second pointer (index 1) going down
        let action = MotionAction::from_raw(0x0105);
        assert_eq!(action, MotionAction::pointer_down(1));
    }

    #[test]
    fn test_from_raw_pointer_up_with_index() {
        let action = MotionAction::from_raw(0x0206);
        assert_eq!(action.kind, ActionKind::PointerUp);
        assert_eq!(action.pointer_index, 2);
    }

    #[test]
    fn test_from_raw_unknown_code() {
        let action = MotionAction::from_raw(0x0009);
        assert_eq!(action.kind, ActionKind::Other(9));
    }

    #[test]
    fn test_to_raw_inverts_from_raw() {
        for raw in [0x0000, 0x0002, 0x0105, 0x0306, 0x0009] {
            assert_eq!(MotionAction::from_raw(raw).to_raw(), raw);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("pointer_down".parse::<ActionKind>(), Ok(ActionKind::PointerDown));
        assert_eq!("MOVE".parse::<ActionKind>(), Ok(ActionKind::Move));
        assert!("press".parse::<ActionKind>().is_err());
    }
}
