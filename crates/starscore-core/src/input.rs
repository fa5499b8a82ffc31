//! Pointer events and the press/drag interaction state.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in the control's local coordinate space.
///
/// Hosts translate their own mouse or touch events into this type. A gesture
/// is one `Down`, zero or more `Move`, then either `Up` or `Cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    Cancel,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Cancel => None,
        }
    }
}

/// Where the control is within a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A press is in progress; `start_value` is the value when it began.
    Tracking { start_value: f64 },
}

impl InteractionState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking { .. })
    }

    /// Value recorded at press-start, if tracking.
    pub fn start_value(&self) -> Option<f64> {
        match self {
            Self::Tracking { start_value } => Some(*start_value),
            Self::Idle => None,
        }
    }
}
