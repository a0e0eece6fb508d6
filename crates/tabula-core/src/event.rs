//! Input events consumed by the grid's interaction state machines.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Identifier of a pointer (mouse, pen or touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u32);

/// Pointer, scroll and viewport events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer pressed
    PointerDown {
        /// Client position
        position: Point,
        /// Pointer that was pressed
        pointer_id: PointerId,
    },
    /// Pointer moved
    PointerMove {
        /// Client position
        position: Point,
        /// Pointer that moved
        pointer_id: PointerId,
    },
    /// Pointer released
    PointerUp {
        /// Client position
        position: Point,
        /// Pointer that was released
        pointer_id: PointerId,
    },
    /// Pointer sequence cancelled by the platform
    PointerCancel {
        /// Pointer that was cancelled
        pointer_id: PointerId,
    },
    /// Pointer capture was lost without a release
    LostPointerCapture {
        /// Pointer that lost capture
        pointer_id: PointerId,
    },
    /// Scroll container moved
    Scroll {
        /// New vertical scroll offset
        scroll_top: f32,
    },
    /// Scroll container was resized
    ViewportResize {
        /// New viewport height
        height: f32,
    },
}

impl Event {
    /// Position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether this event ends a pointer sequence, whatever its target.
    #[must_use]
    pub const fn ends_pointer_sequence(&self) -> bool {
        matches!(
            self,
            Self::PointerUp { .. } | Self::PointerCancel { .. } | Self::LostPointerCapture { .. }
        )
    }
}
