//! Table events and the messages emitted in response.

use crate::export::{ExportColumns, ExportFile, ExportScope};
use crate::pagination::PageInfo;
use crate::sort::SortState;
use tabula_core::{DragData, DropEffect, Event, Point, WindowRange};

/// User interaction routed to a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// Column header clicked
    HeaderClick(String),
    /// Go to a page (1-based)
    SetPage(usize),
    /// Go to the next page
    NextPage,
    /// Go to the previous page
    PreviousPage,
    /// Change the page size
    SetRowsPerPage(usize),
    /// Search box edited
    Search(String),
    /// Simple filter changed
    SetFilter(Option<String>),
    /// Facet option toggled
    ToggleFacet {
        /// Facet key
        facet: String,
        /// Option value
        value: String,
    },
    /// One facet cleared
    ClearFacet(String),
    /// Every filter cleared
    ClearFilters,
    /// Row checkbox toggled
    ToggleRow(String),
    /// Header checkbox toggled
    ToggleAll,
    /// Selection cleared
    ClearSelection,
    /// Row expander toggled
    ToggleExpand(String),
    /// Every row collapsed
    CollapseAll,
    /// Row body clicked
    RowClick(String),
    /// Row action chosen
    RowAction {
        /// Row key
        key: String,
        /// Action label
        label: String,
    },
    /// Bulk action chosen
    BulkAction(String),
    /// Column visibility toggled
    ToggleColumn(String),
    /// Every column shown
    ShowAllColumns,
    /// Column order, widths and visibility reset
    ResetColumns,
    /// Pointer pressed on a column's resize handle
    ResizeStart {
        /// Column key
        key: String,
        /// Pointer position
        position: Point,
        /// Width measured by the host, used when none is resolved
        measured_width: Option<f32>,
    },
    /// Pointer, scroll or viewport event
    Input(Event),
    /// Header drag started
    DragStart(String),
    /// Drag hovering a header
    DragOver(String),
    /// Payload dropped on a header
    Drop {
        /// Key of the header dropped on
        target: String,
        /// Payload from the drag start
        data: DragData,
    },
    /// Drag ended
    DragEnd,
    /// Export requested
    Export {
        /// Rows to export
        scope: ExportScope,
        /// Columns to export
        columns: ExportColumns,
    },
}

/// Change reported back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum TableMessage {
    /// Sort column or direction changed
    SortChanged(SortState),
    /// Shown page or page size changed
    PageChanged(PageInfo),
    /// Filters changed (the page is back to 1)
    FiltersChanged {
        /// Active filter sources
        active_count: usize,
        /// Rows left after filtering
        matching: usize,
    },
    /// Selection changed
    SelectionChanged {
        /// Selected keys, sorted
        selected: Vec<String>,
    },
    /// Expansion changed
    ExpansionChanged {
        /// Expanded keys, sorted
        expanded: Vec<String>,
    },
    /// Row clicked
    RowClicked(String),
    /// Row or bulk action ran
    ActionInvoked(String),
    /// Column visibility or layout changed
    ColumnsChanged {
        /// Visible column keys in display order
        visible: Vec<String>,
    },
    /// Column width changed during a resize
    ColumnResized {
        /// Column key
        key: String,
        /// New width
        width: f32,
    },
    /// Resize finished
    ResizeEnded {
        /// Column key
        key: String,
        /// Final width
        width: f32,
    },
    /// Drag started; hand the payload to the host
    DragStarted(DragData),
    /// Drag hovering; the host suppresses its default when the effect allows a drop
    DragOver(DropEffect),
    /// Column order changed
    ColumnReordered {
        /// Column order
        order: Vec<String>,
    },
    /// Virtualization window moved
    WindowChanged(WindowRange),
    /// Export ready
    Exported(ExportFile),
    /// Export failed
    ExportFailed(String),
}
