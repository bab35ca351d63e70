//! Multi-touch classification

use super::{Classification, Scope, TouchCapability, TouchStrategy};
use crate::message::ActionTag;
use crate::touch::{ActionKind, MotionAction};

/// Per-pointer press/release, fan-out for everything else
pub struct MultiTouchStrategy;

impl TouchStrategy for MultiTouchStrategy {
    fn name(&self) -> &'static str {
        "multi-touch"
    }

    fn capability(&self) -> TouchCapability {
        TouchCapability::Multi
    }

    fn classify(&self, action: MotionAction) -> Classification {
        match action.kind {
            ActionKind::PointerDown => {
                Classification::new(ActionTag::Down, Scope::Pointer(action.pointer_index))
            }
            ActionKind::PointerUp => {
                Classification::new(ActionTag::Up, Scope::Pointer(action.pointer_index))
            }
            ActionKind::Down => Classification::new(ActionTag::Down, Scope::All),
            ActionKind::Move => Classification::new(ActionTag::Xy, Scope::All),
            // Up, Cancel, Outside and unknown codes release every contact
            _ => Classification::new(ActionTag::Up, Scope::All),
        }
    }
}
