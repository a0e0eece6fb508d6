//! Per-row and bulk actions.

use std::fmt;
use std::sync::Arc;

/// Handler invoked with a row.
pub type RowHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Predicate deciding whether an action applies to a row.
pub type RowPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Handler invoked with the selected row keys.
pub type BulkHandler = Arc<dyn Fn(&[String]) + Send + Sync>;

/// Action offered in a row's action menu.
pub struct RowAction<T> {
    /// Menu label
    pub label: String,
    handler: RowHandler<T>,
    visible: Option<RowPredicate<T>>,
}

impl<T> RowAction<T> {
    /// Create an action.
    pub fn new<F>(label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
            visible: None,
        }
    }

    /// Only offer the action for rows matching `predicate`.
    #[must_use]
    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.visible = Some(Arc::new(predicate));
        self
    }

    /// Whether the action is offered for `row`.
    pub fn is_visible(&self, row: &T) -> bool {
        self.visible.as_ref().map_or(true, |p| p(row))
    }

    /// Run the action.
    pub fn invoke(&self, row: &T) {
        (self.handler)(row);
    }
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            handler: Arc::clone(&self.handler),
            visible: self.visible.clone(),
        }
    }
}

impl<T> fmt::Debug for RowAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Action applied to every selected row at once.
#[derive(Clone)]
pub struct BulkAction {
    /// Button label
    pub label: String,
    /// Clear the selection after the handler returns
    pub clear_selection_on_complete: bool,
    handler: BulkHandler,
}

impl BulkAction {
    /// Create a bulk action that clears the selection when done.
    pub fn new<F>(label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            clear_selection_on_complete: true,
            handler: Arc::new(handler),
        }
    }

    /// Keep the selection after the handler returns.
    #[must_use]
    pub const fn keep_selection(mut self) -> Self {
        self.clear_selection_on_complete = false;
        self
    }

    /// Run the action.
    pub fn invoke(&self, keys: &[String]) {
        (self.handler)(keys);
    }
}

impl fmt::Debug for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("label", &self.label)
            .field("clear_selection_on_complete", &self.clear_selection_on_complete)
            .finish_non_exhaustive()
    }
}
