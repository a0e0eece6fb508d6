// Row Virtualization - windowed rendering for one page of rows
//
// Provides:
// - Fixed-height row windows with overscan
// - Leading/trailing spacer heights that keep scrollbar geometry intact
// - A degenerate full-range window when virtualization is off

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Row height used when a table enables virtualization without one.
pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;

/// Rows rendered beyond each edge of the viewport by default.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Configuration for a virtualized row window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Fixed height of every row in pixels
    pub row_height: f32,
    /// Number of rows to render above/below the visible area
    pub overscan: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

/// Rendered slice of a page plus its spacer heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRange {
    /// First rendered row (inclusive)
    pub start: usize,
    /// Last rendered row (exclusive)
    pub end: usize,
    /// Height of the leading spacer
    pub pad_top: f32,
    /// Height of the trailing spacer
    pub pad_bottom: f32,
}

impl WindowRange {
    /// Window covering every row with zero-height spacers.
    #[must_use]
    pub const fn full(item_count: usize) -> Self {
        Self {
            start: 0,
            end: item_count,
            pad_top: 0.0,
            pad_bottom: 0.0,
        }
    }

    /// Range of rows to render.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of rows rendered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether no rows are rendered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if index should be rendered
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Scroll-driven window over the rows of the current page.
///
/// Scroll and viewport updates are stored as-is and the window is derived on
/// every read, so spacer heights can never lag the rendered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualWindow {
    config: Option<WindowConfig>,
    /// Current scroll offset
    scroll_top: f32,
    /// Viewport height
    viewport_height: f32,
}

impl Default for VirtualWindow {
    fn default() -> Self {
        Self::disabled()
    }
}

impl VirtualWindow {
    /// Create an enabled window.
    #[must_use]
    pub fn new(config: WindowConfig, viewport_height: f32) -> Self {
        Self {
            config: Some(config),
            scroll_top: 0.0,
            viewport_height: sanitize(viewport_height),
        }
    }

    /// Create a window that always spans the full page.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            config: None,
            scroll_top: 0.0,
            viewport_height: 0.0,
        }
    }

    /// Whether virtualization is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.is_some_and(|c| c.row_height > 0.0)
    }

    /// Get the window configuration, if enabled.
    #[must_use]
    pub const fn config(&self) -> Option<WindowConfig> {
        self.config
    }

    /// Set scroll position
    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.scroll_top = sanitize(scroll_top);
        log::trace!("virtual window scroll_top={}", self.scroll_top);
    }

    /// Get current scroll position
    #[must_use]
    pub const fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Set viewport height
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = sanitize(height);
        log::trace!("virtual window viewport_height={}", self.viewport_height);
    }

    /// Get viewport height
    #[must_use]
    pub const fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Total scrollable height for `item_count` rows.
    #[must_use]
    pub fn content_height(&self, item_count: usize) -> f32 {
        match self.config {
            Some(config) if config.row_height > 0.0 => item_count as f32 * config.row_height,
            _ => 0.0,
        }
    }

    /// Compute the rendered window for a page of `item_count` rows.
    #[must_use]
    pub fn window(&self, item_count: usize) -> WindowRange {
        let Some(config) = self.config.filter(|c| c.row_height > 0.0) else {
            return WindowRange::full(item_count);
        };

        let row_height = config.row_height;
        let first_visible = (self.scroll_top / row_height).floor() as usize;
        let last_visible = ((self.scroll_top + self.viewport_height) / row_height).ceil() as usize;

        let end = last_visible.saturating_add(config.overscan).min(item_count);
        // A scroll offset left over from a longer page must not invert the range.
        let start = first_visible.saturating_sub(config.overscan).min(end);

        WindowRange {
            start,
            end,
            pad_top: start as f32 * row_height,
            pad_bottom: (item_count - end) as f32 * row_height,
        }
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
