//! Core types for the Tabula data grid.
//!
//! This crate provides the rendering-agnostic pieces the grid is built on:
//! - Geometric primitives: [`Point`]
//! - Input events: [`Event`]
//! - Windowed row rendering: [`VirtualWindow`]
//! - Interaction state machines: [`DragSession`], [`ResizeSession`]

pub mod dnd;
mod event;
mod geometry;
pub mod resize;
pub mod virtualization;

pub use dnd::{DragData, DragDataType, DragPhase, DragSession, DragState, DropEffect, DropResult};
pub use event::{Event, PointerId};
pub use geometry::Point;
pub use resize::{
    ResizeBounds, ResizeOperation, ResizeSession, DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH,
};
pub use virtualization::{
    VirtualWindow, WindowConfig, WindowRange, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT,
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_resize_width_within_bounds(
            start_x in -2000.0f32..2000.0,
            start_width in 0.0f32..1000.0,
            client_x in -4000.0f32..4000.0,
            min in 0.0f32..300.0,
            span in 0.0f32..700.0,
        ) {
            let bounds = ResizeBounds::resolve(Some(min), Some(min + span), ResizeBounds::default());
            let mut session = ResizeSession::new();
            session.begin("col", start_x, start_width, bounds);
            let (_, width) = session.update(client_x).unwrap();
            prop_assert!(width >= bounds.min.floor());
            prop_assert!(width <= bounds.max.ceil());
            prop_assert!(width.is_finite());
        }

        #[test]
        fn prop_drag_session_idle_after_drop(source in "[a-z]{1,8}", target in "[a-z]{1,8}") {
            let mut session = DragSession::default();
            let data = session.begin(&source);
            let result = session.drop_on(&target, &data);
            prop_assert!(!session.is_active());
            prop_assert_eq!(result.is_some(), source != target);
        }
    }
}
