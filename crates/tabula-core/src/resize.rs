//! Pointer-capture column resizing.

use serde::{Deserialize, Serialize};

/// Lower width bound applied when a column declares none.
pub const DEFAULT_MIN_WIDTH: f32 = 80.0;

/// Upper width bound applied when a column declares none.
pub const DEFAULT_MAX_WIDTH: f32 = 800.0;

/// Width limits for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeBounds {
    /// Minimum width in pixels
    pub min: f32,
    /// Maximum width in pixels
    pub max: f32,
}

impl Default for ResizeBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_WIDTH,
            max: DEFAULT_MAX_WIDTH,
        }
    }
}

impl ResizeBounds {
    /// Resolve optional per-column limits against fallbacks.
    #[must_use]
    pub fn resolve(min: Option<f32>, max: Option<f32>, fallback: Self) -> Self {
        let min = min.filter(|v| v.is_finite()).unwrap_or(fallback.min).max(0.0);
        let max = max.filter(|v| v.is_finite()).unwrap_or(fallback.max);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Clamp a width into these bounds.
    #[must_use]
    pub fn clamp(&self, width: f32) -> f32 {
        width.max(self.min).min(self.max)
    }
}

/// One in-flight resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeOperation {
    /// Key of the column being resized
    pub key: String,
    /// Client x where the pointer went down
    pub start_x: f32,
    /// Column width when the pointer went down
    pub start_width: f32,
    /// Width limits
    pub bounds: ResizeBounds,
}

impl ResizeOperation {
    /// Width for a pointer at `client_x`, clamped and rounded to whole pixels.
    #[must_use]
    pub fn width_at(&self, client_x: f32) -> f32 {
        self.bounds
            .clamp(self.start_width + (client_x - self.start_x))
            .round()
    }
}

/// Resize state machine: idle → resizing → idle.
#[derive(Debug, Clone, Default)]
pub struct ResizeSession {
    active: Option<ResizeOperation>,
}

impl ResizeSession {
    /// Create an idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Capture the pointer for `key`. Replaces any resize already in flight.
    ///
    /// `start_width` is kept as given; bounds apply only to the dragged width.
    pub fn begin(&mut self, key: &str, start_x: f32, start_width: f32, bounds: ResizeBounds) {
        let operation = ResizeOperation {
            key: key.to_string(),
            start_x: if start_x.is_finite() { start_x } else { 0.0 },
            start_width: if start_width.is_finite() {
                start_width
            } else {
                bounds.min
            },
            bounds,
        };
        if let Some(previous) = self.active.replace(operation) {
            log::debug!("resize of {} replaced by {key}", previous.key);
        }
    }

    /// Pointer moved; returns the column key and its new width.
    pub fn update(&self, client_x: f32) -> Option<(&str, f32)> {
        if !client_x.is_finite() {
            return None;
        }
        self.active
            .as_ref()
            .map(|op| (op.key.as_str(), op.width_at(client_x)))
    }

    /// Release capture. Safe to call when idle.
    pub fn end(&mut self) -> Option<ResizeOperation> {
        self.active.take()
    }

    /// Whether a resize is in flight.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Get the in-flight resize.
    #[must_use]
    pub const fn active(&self) -> Option<&ResizeOperation> {
        self.active.as_ref()
    }
}
