//! Generic client-side data grid engine.
//!
//! A [`DataTable`] holds an in-memory row set and runs it through a fixed
//! pipeline on every read:
//!
//! 1. [`FilterSet`]: simple filter, facets, then free-text search
//! 2. [`sort_rows`]: stable single-column sort with natural text ordering
//! 3. [`Pagination`]: page slicing with a clamped `safe_page`
//! 4. [`VirtualWindow`](tabula_core::VirtualWindow): optional scroll window
//!
//! Selection and expansion live in key-based ledgers beside the pipeline, and
//! column order, widths and visibility live in a [`ColumnRegistry`]. The
//! table never paints; [`DataTable::view`] produces a [`TableView`] for the
//! host to draw.
//!
//! # Example
//!
//! ```
//! use tabula_grid::{ColumnDef, DataTable, TableEvent};
//!
//! struct Doc {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! let mut table = DataTable::new(
//!     vec![ColumnDef::new("name", "Name")
//!         .sortable()
//!         .accessor(|d: &Doc| d.name.into())],
//!     |d: &Doc| d.id.to_string(),
//! )
//! .rows(vec![Doc { id: 1, name: "item10" }, Doc { id: 2, name: "item2" }]);
//!
//! table.handle_event(TableEvent::HeaderClick("name".into()));
//! let view = table.view();
//! assert_eq!(view.cell(0, "name"), Some("item2"));
//! ```

mod action;
mod cell;
mod column;
mod config;
mod data_table;
mod error;
mod event;
mod export;
mod filter;
mod pagination;
mod selection;
mod sort;
mod view;

pub use action::{BulkAction, BulkHandler, RowAction, RowHandler, RowPredicate};
pub use cell::{natural_cmp, CellValue, SortPrimitive, PLACEHOLDER};
pub use column::{
    Accessor, ColumnDef, ColumnRegistry, ColumnWidth, Gutters, Renderer, StickyOffset,
    StickySide, TextAlign, DEFAULT_COLUMN_WIDTH,
};
pub use config::{EmptyCopy, TableConfig};
pub use data_table::{DataTable, RowKeyFn, COLUMN_DRAG_TYPE};
pub use error::{GridError, GridResult};
pub use event::{TableEvent, TableMessage};
pub use export::{
    encode_csv, ExportColumns, ExportConfig, ExportFile, ExportScope, CSV_MIME_TYPE, UTF8_BOM,
};
pub use filter::{FacetDef, FilterOption, FilterSet, FilterState, KeyAccessor, SearchDef, SimpleFilter};
pub use pagination::{total_pages, PageInfo, Pagination, DEFAULT_ROWS_PER_PAGE};
pub use selection::{CheckState, KeyLedger};
pub use sort::{sort_rows, SortDirection, SortState};
pub use view::{EmptyState, HeaderCell, RenderedRow, TableView};

pub use tabula_core::{
    DragData, DropEffect, Event, Point, PointerId, WindowConfig, WindowRange,
};
