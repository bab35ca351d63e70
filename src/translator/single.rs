//! Single-contact classification
//!
//! Platforms without multi-touch only ever report one contact. Pointer
//! press/release codes are unknown there and fall through to release.

use super::{Classification, Scope, TouchCapability, TouchStrategy};
use crate::message::ActionTag;
use crate::touch::{ActionKind, MotionAction};

pub struct SingleTouchStrategy;

impl TouchStrategy for SingleTouchStrategy {
    fn name(&self) -> &'static str {
        "single-touch"
    }

    fn capability(&self) -> TouchCapability {
        TouchCapability::Single
    }

    fn classify(&self, action: MotionAction) -> Classification {
        let tag = match action.kind {
            ActionKind::Down => ActionTag::Down,
            ActionKind::Move => ActionTag::Xy,
            _ => ActionTag::Up,
        };
        Classification::new(tag, Scope::Primary)
    }
}
