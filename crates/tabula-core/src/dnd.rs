//! Drag and drop sessions for reordering keyed items.
//!
//! This module provides:
//! - Drag payloads carrying the dragged item's key
//! - A drag session state machine (idle → active → idle)
//! - Drop resolution with cleanup on every exit path

use serde::{Deserialize, Serialize};

/// Type of data being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragDataType {
    /// Plain text.
    Text,
    /// Custom type identifier.
    Custom(String),
}

impl DragDataType {
    /// Create a custom drag data type.
    pub fn custom(name: &str) -> Self {
        Self::Custom(name.to_string())
    }
}

/// Payload attached to a drag operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragData {
    /// Primary data type.
    pub data_type: DragDataType,
    /// String representation of the data.
    pub text: String,
}

impl DragData {
    /// Create new drag data with text.
    pub fn text(content: &str) -> Self {
        Self {
            data_type: DragDataType::Text,
            text: content.to_string(),
        }
    }

    /// Create drag data with custom type.
    pub fn custom(type_name: &str, data: &str) -> Self {
        Self {
            data_type: DragDataType::Custom(type_name.to_string()),
            text: data.to_string(),
        }
    }

    /// Get data in a specific format.
    ///
    /// Custom payloads also answer as plain text, like a native data transfer.
    pub fn get_format(&self, data_type: &DragDataType) -> Option<&str> {
        if &self.data_type == data_type || *data_type == DragDataType::Text {
            Some(&self.text)
        } else {
            None
        }
    }
}

/// Current phase of a drag operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    /// Drag has started.
    Started,
    /// Hovering over a valid drop target.
    OverTarget,
    /// Hovering over something that refuses the drop.
    Rejected,
}

/// Effect/operation type for a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropEffect {
    /// No drop allowed.
    #[default]
    None,
    /// Move data to target.
    Move,
}

impl DropEffect {
    /// Whether the host should suppress its default handling to allow a drop.
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Move)
    }
}

/// State of an active drag operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    /// Key of the dragged item.
    pub source: String,
    /// Current phase.
    pub phase: DragPhase,
    /// Currently hovered drop target.
    pub hover_target: Option<String>,
}

impl DragState {
    /// Create a new drag state.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            phase: DragPhase::Started,
            hover_target: None,
        }
    }
}

/// A completed drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    /// Key of the dropped item.
    pub source: String,
    /// Key of the item it was dropped on.
    pub target: String,
}

/// Drag session for one draggable collection.
///
/// At most one drag is in flight. Every exit path (drop, drag end, cancel)
/// returns the session to idle.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    payload_type: Option<DragDataType>,
    state: Option<DragState>,
}

impl DragSession {
    /// Create a session whose payloads use a custom data type.
    pub fn with_payload_type(type_name: &str) -> Self {
        Self {
            payload_type: Some(DragDataType::custom(type_name)),
            state: None,
        }
    }

    /// Begin dragging `source`, returning the payload to hand to the host.
    ///
    /// Starting a new drag replaces any stale one.
    pub fn begin(&mut self, source: &str) -> DragData {
        if let Some(stale) = self.state.replace(DragState::new(source)) {
            log::debug!("drag of {} replaced by {source}", stale.source);
        }
        match &self.payload_type {
            Some(DragDataType::Custom(name)) => DragData::custom(name, source),
            _ => DragData::text(source),
        }
    }

    /// Pointer is over `target`; `accepts` reports whether it takes drops.
    pub fn over(&mut self, target: &str, accepts: bool) -> DropEffect {
        let Some(state) = self.state.as_mut() else {
            // Drags from outside this session are only allowed on accepting targets.
            return if accepts {
                DropEffect::Move
            } else {
                DropEffect::None
            };
        };
        state.hover_target = Some(target.to_string());
        if accepts && state.source != target {
            state.phase = DragPhase::OverTarget;
            DropEffect::Move
        } else {
            state.phase = DragPhase::Rejected;
            DropEffect::None
        }
    }

    /// Drop the payload on `target`.
    ///
    /// The source is read from the payload rather than session state, so a drop
    /// still resolves when the host lost the drag-start. Returns `None` for
    /// self-drops and foreign payloads. The session is always cleared.
    pub fn drop_on(&mut self, target: &str, data: &DragData) -> Option<DropResult> {
        self.state = None;
        let expected = self.payload_type.clone().unwrap_or(DragDataType::Text);
        let source = data.get_format(&expected)?;
        if source.is_empty() || source == target {
            return None;
        }
        Some(DropResult {
            source: source.to_string(),
            target: target.to_string(),
        })
    }

    /// Drag ended without a drop (or after one). Returns whether a drag was active.
    pub fn end(&mut self) -> bool {
        self.state.take().is_some()
    }

    /// Check if a drag is active.
    pub const fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Get the active drag state.
    pub const fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DragData Tests =====

    #[test]
    fn test_drag_data_text() {
        let data = DragData::text("name");
        assert_eq!(data.get_format(&DragDataType::Text), Some("name"));
        assert_eq!(data.get_format(&DragDataType::custom("x")), None);
    }

    #[test]
    fn test_drag_data_custom_answers_as_text() {
        let data = DragData::custom("column", "status");
        assert_eq!(data.get_format(&DragDataType::custom("column")), Some("status"));
        assert_eq!(data.get_format(&DragDataType::Text), Some("status"));
        assert_eq!(data.get_format(&DragDataType::custom("row")), None);
    }

    // ===== Session Tests =====

    #[test]
    fn test_session_begin_and_drop() {
        let mut session = DragSession::with_payload_type("column");
        let data = session.begin("status");
        assert!(session.is_active());
        assert_eq!(session.state().map(|s| s.phase), Some(DragPhase::Started));

        assert_eq!(session.over("name", true), DropEffect::Move);
        assert_eq!(session.state().map(|s| s.phase), Some(DragPhase::OverTarget));

        let result = session.drop_on("name", &data);
        assert_eq!(
            result,
            Some(DropResult {
                source: "status".to_string(),
                target: "name".to_string()
            })
        );
        assert!(!session.is_active());
    }

    #[test]
    fn test_session_over_rejecting_target() {
        let mut session = DragSession::default();
        session.begin("a");
        assert_eq!(session.over("b", false), DropEffect::None);
        assert_eq!(session.state().map(|s| s.phase), Some(DragPhase::Rejected));
        assert!(!DropEffect::None.prevents_default());
        assert!(DropEffect::Move.prevents_default());
    }

    #[test]
    fn test_session_over_self_is_rejected() {
        let mut session = DragSession::default();
        session.begin("a");
        assert_eq!(session.over("a", true), DropEffect::None);
    }

    #[test]
    fn test_session_self_drop_is_noop() {
        let mut session = DragSession::default();
        let data = session.begin("a");
        assert!(session.drop_on("a", &data).is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn test_session_foreign_payload_rejected() {
        let mut session = DragSession::with_payload_type("column");
        session.begin("a");
        let foreign = DragData::custom("file", "/tmp/x");
        assert!(session.drop_on("b", &foreign).is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn test_session_end_clears_state() {
        let mut session = DragSession::default();
        session.begin("a");
        assert!(session.end());
        assert!(!session.is_active());
        assert!(!session.end());
    }

    #[test]
    fn test_session_begin_replaces_stale_drag() {
        let mut session = DragSession::default();
        session.begin("a");
        session.begin("b");
        assert_eq!(session.state().map(|s| s.source.as_str()), Some("b"));
    }

    #[test]
    fn test_session_drop_without_begin_uses_payload() {
        let mut session = DragSession::default();
        let result = session.drop_on("b", &DragData::text("a"));
        assert_eq!(result.map(|r| r.source), Some("a".to_string()));
    }
}
