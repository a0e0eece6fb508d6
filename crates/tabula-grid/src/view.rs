//! View model handed to the host for painting.

use crate::column::{StickyOffset, TextAlign};
use crate::config::EmptyCopy;
use crate::pagination::PageInfo;
use crate::selection::CheckState;
use crate::sort::SortDirection;

/// One column header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    /// Column key
    pub key: String,
    /// Header label
    pub header: String,
    /// Whether clicking the header sorts
    pub sortable: bool,
    /// Direction indicator when this column is sorted
    pub sort_direction: Option<SortDirection>,
    /// Resolved width (None = intrinsic)
    pub width: Option<f32>,
    /// Sticky pin, if any
    pub sticky: Option<StickyOffset>,
    /// Whether the header shows a resize handle
    pub resizable: bool,
    /// Whether the header can be dragged
    pub reorderable: bool,
    /// Text alignment
    pub align: TextAlign,
}

/// One painted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Row key
    pub key: String,
    /// Index within the page
    pub index: usize,
    /// Cell text in header order
    pub cells: Vec<String>,
    /// Row is selected
    pub selected: bool,
    /// Row is expanded
    pub expanded: bool,
    /// Labels of the actions offered for this row
    pub actions: Vec<String>,
}

/// Which empty state to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The table has no rows at all
    NoData(EmptyCopy),
    /// Filters exclude every row
    NoMatches(EmptyCopy),
}

/// Everything a host needs to paint the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Visible column headers in display order
    pub headers: Vec<HeaderCell>,
    /// Rows inside the virtualization window
    pub rows: Vec<RenderedRow>,
    /// Leading spacer height
    pub pad_top: f32,
    /// Trailing spacer height
    pub pad_bottom: f32,
    /// Page summary
    pub page: PageInfo,
    /// Current page size
    pub rows_per_page: usize,
    /// Page sizes offered
    pub rows_per_page_options: Vec<usize>,
    /// Select-all checkbox state for the page
    pub select_all: CheckState,
    /// Number of selected keys across all pages
    pub selected_count: usize,
    /// Number of active filter sources
    pub active_filters: usize,
    /// Empty state, when the page has no rows
    pub empty: Option<EmptyState>,
}

impl TableView {
    /// Text of one cell by column key.
    #[must_use]
    pub fn cell(&self, row: usize, key: &str) -> Option<&str> {
        let column = self.headers.iter().position(|h| h.key == key)?;
        self.rows.get(row)?.cells.get(column).map(String::as_str)
    }

    /// Keys of the painted rows.
    #[must_use]
    pub fn row_keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }
}
