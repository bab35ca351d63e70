//! Touch event model
//!
//! A [`TouchEvent`] is one snapshot of the input surface: the action that
//! produced it and every contact point currently down.

pub mod action;

use serde::{Deserialize, Serialize};

pub use action::{ActionKind, MotionAction};

/// One contact point in view pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    /// Stable id for the duration of the contact
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Snapshot of a motion event
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub action: MotionAction,
    /// Active contacts, in platform order
    pub pointers: Vec<Pointer>,
}

impl TouchEvent {
    pub fn new(action: MotionAction, pointers: Vec<Pointer>) -> Self {
        Self { action, pointers }
    }

    /// Build an event from a packed platform action word
    pub fn from_raw(action: u32, pointers: Vec<Pointer>) -> Self {
        Self::new(MotionAction::from_raw(action), pointers)
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer(&self, index: usize) -> Option<&Pointer> {
        self.pointers.get(index)
    }
}

/// Dimensions of the displayed image touches are normalized against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    width: u32,
    height: u32,
}

impl ImageSize {
    /// Returns `None` if either extent is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Parse `WIDTHxHEIGHT` (e.g. `320x480`)
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        Self::new(w.trim().parse().ok()?, h.trim().parse().ok()?)
    }
}
