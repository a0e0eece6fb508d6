//! The data table: row pipeline, ledgers and column interaction.

use crate::action::{BulkAction, RowAction, RowHandler};
use crate::column::{ColumnDef, ColumnRegistry, StickyOffset};
use crate::config::TableConfig;
use crate::error::{GridError, GridResult};
use crate::event::{TableEvent, TableMessage};
use crate::export::{encode_csv, ExportColumns, ExportFile, ExportScope, CSV_MIME_TYPE};
use crate::filter::{FilterOption, FilterSet, FilterState};
use crate::pagination::{PageInfo, Pagination};
use crate::selection::{CheckState, KeyLedger};
use crate::sort::{sort_rows, SortDirection, SortState};
use crate::view::{EmptyState, HeaderCell, RenderedRow, TableView};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tabula_core::{
    DragData, DragSession, DropEffect, Event, ResizeBounds, ResizeSession, VirtualWindow,
    WindowRange,
};

/// Payload type used for header drags.
pub const COLUMN_DRAG_TYPE: &str = "application/x-tabula-column";

/// Extracts the identity of a row.
pub type RowKeyFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Generic client-side data table.
///
/// Rows flow through filter, sort, paginate and virtualize on every read;
/// nothing derived from the rows is cached. Selection and expansion are kept
/// as key ledgers so they survive any change to the row set.
pub struct DataTable<T> {
    rows: Vec<T>,
    row_key: RowKeyFn<T>,
    registry: ColumnRegistry<T>,
    filters: FilterSet<T>,
    filter_state: FilterState,
    sort: SortState,
    pagination: Pagination,
    window: VirtualWindow,
    selectable: bool,
    selection: KeyLedger,
    expandable: bool,
    expansion: KeyLedger,
    resize: ResizeSession,
    drag: DragSession,
    actions: Vec<RowAction<T>>,
    bulk_actions: Vec<BulkAction>,
    on_row_click: Option<RowHandler<T>>,
    config: TableConfig,
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.rows.len())
            .field("registry", &self.registry)
            .field("filter_state", &self.filter_state)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("selection", &self.selection.len())
            .finish_non_exhaustive()
    }
}

impl<T> DataTable<T> {
    /// Create a table over `columns`, identifying rows with `row_key`.
    pub fn new<F>(columns: Vec<ColumnDef<T>>, row_key: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let config = TableConfig::default();
        Self {
            rows: Vec::new(),
            row_key: Arc::new(row_key),
            registry: ColumnRegistry::with_default_width(columns, config.default_column_width),
            filters: FilterSet::new(),
            filter_state: FilterState::default(),
            sort: SortState::default(),
            pagination: Pagination::new(
                config.rows_per_page_options.clone(),
                config.default_rows_per_page,
            ),
            window: VirtualWindow::disabled(),
            selectable: false,
            selection: KeyLedger::new(),
            expandable: false,
            expansion: KeyLedger::new(),
            resize: ResizeSession::new(),
            drag: DragSession::with_payload_type(COLUMN_DRAG_TYPE),
            actions: Vec::new(),
            bulk_actions: Vec::new(),
            on_row_click: None,
            config,
        }
    }

    /// Apply a configuration. Column layout is re-seeded.
    #[must_use]
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.registry = ColumnRegistry::with_default_width(
            self.registry.columns().to_vec(),
            config.default_column_width,
        );
        self.pagination = Pagination::new(
            config.rows_per_page_options.clone(),
            config.default_rows_per_page,
        );
        self.window = config.virtualize.map_or_else(VirtualWindow::disabled, |window| {
            VirtualWindow::new(window, config.viewport_height)
        });
        self.config = config;
        self
    }

    /// Set the rows.
    #[must_use]
    pub fn rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Set the filter sources.
    #[must_use]
    pub fn filters(mut self, filters: FilterSet<T>) -> Self {
        self.filters = filters;
        self
    }

    /// Enable the selection column.
    #[must_use]
    pub const fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Enable the row expander column.
    #[must_use]
    pub const fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    /// Add a row action.
    #[must_use]
    pub fn action(mut self, action: RowAction<T>) -> Self {
        self.actions.push(action);
        self
    }

    /// Add a bulk action.
    #[must_use]
    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.bulk_actions.push(action);
        self
    }

    /// Set the row click handler.
    #[must_use]
    pub fn on_row_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Arc::new(handler));
        self
    }

    /// Set the initial sort.
    #[must_use]
    pub fn sorted_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = SortState::new(key, direction);
        self
    }

    // ===== Inputs =====

    /// Replace the rows. Selection and expansion are kept by key.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        let duplicates = self.duplicate_keys();
        if !duplicates.is_empty() {
            log::warn!("row keys are not unique: {duplicates:?}");
        }
    }

    /// Replace the declared columns, keeping order, widths and visibility of
    /// retained keys.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<T>>) {
        self.registry.reconcile(columns);
    }

    /// Get the rows.
    #[must_use]
    pub fn get_rows(&self) -> &[T] {
        &self.rows
    }

    /// Get row count (unfiltered).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get declared column count.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.registry.columns().len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Key of `row`.
    pub fn key_of(&self, row: &T) -> String {
        (self.row_key)(row)
    }

    /// Find a row by key.
    #[must_use]
    pub fn find_row(&self, key: &str) -> Option<&T> {
        self.rows.iter().find(|row| self.key_of(row) == key)
    }

    /// Keys shared by more than one row, sorted.
    #[must_use]
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for row in &self.rows {
            *counts.entry((self.row_key)(row)).or_default() += 1;
        }
        let duplicates: BTreeSet<String> = counts
            .into_iter()
            .filter_map(|(key, n)| (n > 1).then_some(key))
            .collect();
        duplicates.into_iter().collect()
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Get the column registry.
    #[must_use]
    pub const fn columns(&self) -> &ColumnRegistry<T> {
        &self.registry
    }

    /// Get the filter sources.
    #[must_use]
    pub const fn get_filters(&self) -> &FilterSet<T> {
        &self.filters
    }

    /// Get the filter state.
    #[must_use]
    pub const fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    /// Get the sort state.
    #[must_use]
    pub const fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Get the pagination state.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Get the virtualization window.
    #[must_use]
    pub const fn virtual_window(&self) -> &VirtualWindow {
        &self.window
    }

    // ===== Pipeline =====

    /// Rows passing every active filter, in input order.
    #[must_use]
    pub fn filtered_rows(&self) -> Vec<&T> {
        self.filters.apply(&self.rows, &self.filter_state)
    }

    /// Filtered rows in sort order.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<&T> {
        let filtered = self.filtered_rows();
        sort_rows(&filtered, self.sort_column(), self.sort.direction)
    }

    /// Rows of the shown page.
    #[must_use]
    pub fn page_rows(&self) -> Vec<&T> {
        let sorted = self.sorted_rows();
        self.pagination.page(&sorted).to_vec()
    }

    /// Rows inside the virtualization window of the shown page.
    #[must_use]
    pub fn rendered_rows(&self) -> Vec<&T> {
        let page = self.page_rows();
        let window = self.window.window(page.len());
        page[window.range()].to_vec()
    }

    /// Window over the shown page.
    #[must_use]
    pub fn window(&self) -> WindowRange {
        self.window.window(self.page_rows().len())
    }

    /// Summary of the shown page.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        self.pagination.info(self.filtered_rows().len())
    }

    /// Shown page, clamped to the filtered row count.
    #[must_use]
    pub fn safe_page(&self) -> usize {
        self.pagination.safe_page(self.filtered_rows().len())
    }

    fn sort_column(&self) -> Option<&ColumnDef<T>> {
        self.sort
            .key
            .as_deref()
            .and_then(|key| self.registry.column(key))
            .filter(|column| column.sortable)
    }

    fn page_keys(&self) -> Vec<String> {
        self.page_rows().into_iter().map(|row| self.key_of(row)).collect()
    }

    // ===== Sorting and Paging =====

    /// Header click on `key`. Returns whether the sort changed.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        match self.registry.column(key) {
            Some(column) if column.sortable => {
                self.sort.toggle(key);
                true
            }
            Some(_) => false,
            None => {
                log::warn!("sort requested on unknown column {key:?}");
                false
            }
        }
    }

    /// Replace the sort state.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Go to `page`. Returns whether the shown page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let before = self.safe_page();
        self.pagination.set_page(page);
        self.safe_page() != before
    }

    /// Go to the next page. Returns whether the shown page changed.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.safe_page() + 1)
    }

    /// Go to the previous page. Returns whether the shown page changed.
    pub fn previous_page(&mut self) -> bool {
        self.set_page(self.safe_page().saturating_sub(1))
    }

    /// Change the page size and return to page 1. Returns whether either changed.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> bool {
        self.pagination.set_rows_per_page(rows_per_page)
    }

    // ===== Filtering =====

    /// Set the search text. Returns whether it changed.
    pub fn set_search(&mut self, search: &str) -> bool {
        let changed = self.filter_state.set_search(search);
        self.after_filter_change(changed)
    }

    /// Select (or clear) the simple-filter value. Returns whether it changed.
    pub fn set_active_filter(&mut self, value: Option<String>) -> bool {
        let changed = self.filter_state.set_active_filter(value);
        self.after_filter_change(changed)
    }

    /// Flip one facet value. Unknown facets are ignored.
    pub fn toggle_facet(&mut self, facet: &str, value: &str) -> bool {
        if !self.has_facet(facet) {
            log::warn!("toggle on unknown facet {facet:?}");
            return false;
        }
        self.filter_state.toggle_facet(facet, value);
        self.after_filter_change(true)
    }

    /// Replace a facet's selection. Returns whether it changed.
    pub fn set_facet(&mut self, facet: &str, values: BTreeSet<String>) -> bool {
        if !self.has_facet(facet) {
            log::warn!("selection on unknown facet {facet:?}");
            return false;
        }
        let changed = self.filter_state.set_facet(facet, values);
        self.after_filter_change(changed)
    }

    /// Clear one facet. Returns whether it had a selection.
    pub fn clear_facet(&mut self, facet: &str) -> bool {
        let changed = self.filter_state.clear_facet(facet);
        self.after_filter_change(changed)
    }

    /// Clear every filter. Returns whether anything was active.
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.filter_state.clear_all();
        self.after_filter_change(changed)
    }

    /// Per-option counts for a facet under the other active filters.
    #[must_use]
    pub fn facet_counts(&self, facet: &str) -> Vec<(FilterOption, usize)> {
        self.filters.facet_counts(&self.rows, &self.filter_state, facet)
    }

    fn has_facet(&self, facet: &str) -> bool {
        self.filters.get_facets().iter().any(|f| f.key == facet)
    }

    fn after_filter_change(&mut self, changed: bool) -> bool {
        if changed {
            self.pagination.reset();
        }
        changed
    }

    // ===== Selection and Expansion =====

    /// Whether selection is enabled.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether `key` is selected.
    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    /// Flip selection of one row. Returns whether the ledger changed.
    pub fn toggle_select_row(&mut self, key: &str) -> bool {
        if !self.selectable {
            return false;
        }
        self.selection.toggle(key);
        true
    }

    /// Select or deselect every row on the shown page.
    pub fn toggle_select_all(&mut self) -> bool {
        if !self.selectable {
            return false;
        }
        let keys = self.page_keys();
        let distinct: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        if distinct.len() != keys.len() {
            log::warn!("duplicate row keys on page {}", self.safe_page());
        }
        self.selection.toggle_all(distinct)
    }

    /// Header checkbox state for the shown page.
    #[must_use]
    pub fn select_all_state(&self) -> CheckState {
        let keys = self.page_keys();
        self.selection.page_state(keys.iter().map(String::as_str))
    }

    /// Deselect everything. Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    /// Selected keys, sorted.
    #[must_use]
    pub fn selected_keys(&self) -> Vec<String> {
        self.selection.keys()
    }

    /// Get the selection ledger.
    #[must_use]
    pub const fn selection(&self) -> &KeyLedger {
        &self.selection
    }

    /// Whether expansion is enabled.
    #[must_use]
    pub const fn is_expandable(&self) -> bool {
        self.expandable
    }

    /// Whether `key` is expanded.
    #[must_use]
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expansion.contains(key)
    }

    /// Flip expansion of one row. Returns whether the ledger changed.
    pub fn toggle_expand(&mut self, key: &str) -> bool {
        if !self.expandable {
            return false;
        }
        self.expansion.toggle(key);
        true
    }

    /// Collapse every row. Returns whether anything was expanded.
    pub fn collapse_all(&mut self) -> bool {
        self.expansion.clear()
    }

    /// Expanded keys, sorted.
    #[must_use]
    pub fn expanded_keys(&self) -> Vec<String> {
        self.expansion.keys()
    }

    // ===== Actions =====

    /// Actions offered for `row`.
    pub fn row_actions_for(&self, row: &T) -> Vec<&RowAction<T>> {
        self.actions.iter().filter(|a| a.is_visible(row)).collect()
    }

    /// Bulk actions.
    #[must_use]
    pub fn get_bulk_actions(&self) -> &[BulkAction] {
        &self.bulk_actions
    }

    /// Run the row action `label` on the row with `key`.
    pub fn run_row_action(&self, key: &str, label: &str) -> bool {
        let Some(row) = self.find_row(key) else {
            log::warn!("row action {label:?} on unknown row {key:?}");
            return false;
        };
        match self.actions.iter().find(|a| a.label == label && a.is_visible(row)) {
            Some(action) => {
                action.invoke(row);
                true
            }
            None => false,
        }
    }

    /// Run the bulk action `label` over the selected keys.
    pub fn run_bulk_action(&mut self, label: &str) -> bool {
        let Some(action) = self.bulk_actions.iter().find(|a| a.label == label).cloned() else {
            log::warn!("unknown bulk action {label:?}");
            return false;
        };
        if self.selection.is_empty() {
            return false;
        }
        let keys = self.selection.keys();
        log::debug!("bulk action {label:?} on {} rows", keys.len());
        action.invoke(&keys);
        if action.clear_selection_on_complete {
            self.selection.clear();
        }
        true
    }

    /// Row body click. Returns whether a handler ran.
    pub fn click_row(&self, key: &str) -> bool {
        let (Some(handler), Some(row)) = (&self.on_row_click, self.find_row(key)) else {
            return false;
        };
        handler(row);
        true
    }

    // ===== Columns =====

    /// Show or hide a column. Returns the new hidden state.
    pub fn toggle_column_visibility(&mut self, key: &str) -> Option<bool> {
        let hidden = self.registry.toggle_visibility(key);
        if hidden.is_none() {
            log::warn!("visibility toggle on unknown column {key:?}");
        }
        hidden
    }

    /// Show every column.
    pub fn show_all_columns(&mut self) {
        self.registry.show_all();
    }

    /// Restore declared order, widths and visibility.
    pub fn reset_columns(&mut self) {
        self.registry.reset();
    }

    /// Sticky offsets for the visible columns.
    #[must_use]
    pub fn sticky_offsets(&self) -> HashMap<String, StickyOffset> {
        let gutters = self
            .config
            .gutters(self.selectable, self.expandable, !self.actions.is_empty());
        self.registry.sticky_offsets(gutters)
    }

    fn can_resize(&self, key: &str) -> bool {
        self.config.resizable_columns && self.registry.column(key).is_some_and(|c| c.resizable)
    }

    fn can_reorder(&self, key: &str) -> bool {
        self.config.reorderable_columns && self.registry.column(key).is_some_and(|c| c.reorderable)
    }

    /// Pointer down on `key`'s resize handle.
    ///
    /// The starting width is the resolved width, else `measured_width`, else
    /// the default column width.
    pub fn begin_resize(&mut self, key: &str, client_x: f32, measured_width: Option<f32>) -> bool {
        if !self.can_resize(key) {
            return false;
        }
        let Some(column) = self.registry.column(key) else {
            return false;
        };
        let bounds = ResizeBounds::resolve(
            column.min_width,
            column.max_width,
            self.config.resize_bounds(),
        );
        let start_width = self
            .registry
            .width(key)
            .or_else(|| measured_width.filter(|w| w.is_finite() && *w > 0.0))
            .unwrap_or_else(|| self.registry.default_width());
        self.drag.end();
        self.resize.begin(key, client_x, start_width, bounds);
        true
    }

    /// Pointer moved during a resize; writes and returns the new width.
    pub fn resize_to(&mut self, client_x: f32) -> Option<(String, f32)> {
        let (key, width) = self.resize.update(client_x)?;
        let key = key.to_string();
        self.registry.set_width(&key, width);
        Some((key, width))
    }

    /// Pointer released, cancelled or lost capture.
    pub fn end_resize(&mut self) -> Option<(String, f32)> {
        let operation = self.resize.end()?;
        let width = self.registry.resolved_width(&operation.key);
        log::debug!("resized column {:?} to {width}px", operation.key);
        Some((operation.key, width))
    }

    /// Whether a resize is in flight.
    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    /// Drag start on `key`'s header. Returns the payload for the host.
    pub fn drag_start(&mut self, key: &str) -> Option<DragData> {
        if !self.can_reorder(key) {
            return None;
        }
        self.resize.end();
        Some(self.drag.begin(key))
    }

    /// Drag over `target`'s header.
    pub fn drag_over(&mut self, target: &str) -> DropEffect {
        let accepts = self.can_reorder(target);
        self.drag.over(target, accepts)
    }

    /// Drop on `target`'s header. Returns whether the order changed.
    pub fn drop_column(&mut self, target: &str, data: &DragData) -> bool {
        let Some(drop) = self.drag.drop_on(target, data) else {
            return false;
        };
        if !self.can_reorder(&drop.source) || !self.can_reorder(&drop.target) {
            return false;
        }
        let moved = self.registry.move_column(&drop.source, &drop.target);
        if moved {
            log::debug!("moved column {:?} to {:?}", drop.source, drop.target);
        }
        moved
    }

    /// Drag ended. Returns whether a drag was active.
    pub fn drag_end(&mut self) -> bool {
        self.drag.end()
    }

    /// Whether a header drag is in flight.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    // ===== Virtualization =====

    /// Scroll moved.
    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.window.set_scroll_top(scroll_top);
    }

    /// Viewport resized.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.window.set_viewport_height(height);
    }

    // ===== Export =====

    /// Export `scope` rows under `columns` as CSV.
    pub fn export(&self, scope: ExportScope, columns: &ExportColumns) -> GridResult<ExportFile> {
        let rows: Vec<&T> = match scope {
            ExportScope::Page => self.page_rows(),
            ExportScope::Filtered => self.sorted_rows(),
            ExportScope::All => self.rows.iter().collect(),
        };
        let columns: Vec<&ColumnDef<T>> = match columns {
            ExportColumns::Visible => self.registry.visible_columns(),
            ExportColumns::Keys(keys) => keys
                .iter()
                .map(|key| {
                    self.registry
                        .column(key)
                        .ok_or_else(|| GridError::UnknownColumn(key.clone()))
                })
                .collect::<GridResult<_>>()?,
        };
        let contents = encode_csv(&rows, &columns, self.config.export.include_bom)?;
        let filename = self.config.export.filename(scope);
        log::debug!(
            "exported {} rows x {} columns to {filename}",
            rows.len(),
            columns.len()
        );
        Ok(ExportFile {
            filename,
            mime_type: CSV_MIME_TYPE,
            contents,
        })
    }

    // ===== View =====

    /// Build the view model for the current state.
    #[must_use]
    pub fn view(&self) -> TableView {
        let sorted = self.sorted_rows();
        let total = sorted.len();
        let page = &sorted[self.pagination.page_range(total)];
        let window = self.window.window(page.len());
        let visible = self.registry.visible_columns();
        let offsets = self.sticky_offsets();

        let headers = visible
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                header: column.header.clone(),
                sortable: column.sortable,
                sort_direction: if column.sortable {
                    self.sort.direction_for(&column.key)
                } else {
                    None
                },
                width: self.registry.width(&column.key),
                sticky: offsets.get(&column.key).copied(),
                resizable: self.can_resize(&column.key),
                reorderable: self.can_reorder(&column.key),
                align: column.align,
            })
            .collect();

        let rows = page[window.range()]
            .iter()
            .enumerate()
            .map(|(offset, row)| {
                let index = window.start + offset;
                let key = self.key_of(row);
                RenderedRow {
                    cells: visible.iter().map(|c| c.render_cell(row, index)).collect(),
                    selected: self.selectable && self.selection.contains(&key),
                    expanded: self.expandable && self.expansion.contains(&key),
                    actions: self
                        .row_actions_for(row)
                        .into_iter()
                        .map(|a| a.label.clone())
                        .collect(),
                    index,
                    key,
                }
            })
            .collect();

        let page_keys: Vec<String> = page.iter().map(|row| self.key_of(row)).collect();
        let empty = if !page.is_empty() {
            None
        } else if self.rows.is_empty() {
            Some(EmptyState::NoData(self.config.empty.clone()))
        } else {
            Some(EmptyState::NoMatches(self.config.no_results.clone()))
        };

        TableView {
            headers,
            rows,
            pad_top: window.pad_top,
            pad_bottom: window.pad_bottom,
            page: self.pagination.info(total),
            rows_per_page: self.pagination.rows_per_page(),
            rows_per_page_options: self.pagination.options().to_vec(),
            select_all: self.selection.page_state(page_keys.iter().map(String::as_str)),
            selected_count: self.selection.len(),
            active_filters: self.filter_state.active_count(),
            empty,
        }
    }

    // ===== Events =====

    /// Route an interaction and report what changed.
    pub fn handle_event(&mut self, event: TableEvent) -> Option<TableMessage> {
        match event {
            TableEvent::HeaderClick(key) => self
                .toggle_sort(&key)
                .then(|| TableMessage::SortChanged(self.sort.clone())),
            TableEvent::SetPage(page) => {
                let changed = self.set_page(page);
                self.page_message(changed)
            }
            TableEvent::NextPage => {
                let changed = self.next_page();
                self.page_message(changed)
            }
            TableEvent::PreviousPage => {
                let changed = self.previous_page();
                self.page_message(changed)
            }
            TableEvent::SetRowsPerPage(n) => {
                let changed = self.set_rows_per_page(n);
                self.page_message(changed)
            }
            TableEvent::Search(text) => {
                let changed = self.set_search(&text);
                self.filters_message(changed)
            }
            TableEvent::SetFilter(value) => {
                let changed = self.set_active_filter(value);
                self.filters_message(changed)
            }
            TableEvent::ToggleFacet { facet, value } => {
                let changed = self.toggle_facet(&facet, &value);
                self.filters_message(changed)
            }
            TableEvent::ClearFacet(facet) => {
                let changed = self.clear_facet(&facet);
                self.filters_message(changed)
            }
            TableEvent::ClearFilters => {
                let changed = self.clear_filters();
                self.filters_message(changed)
            }
            TableEvent::ToggleRow(key) => {
                let changed = self.toggle_select_row(&key);
                self.selection_message(changed)
            }
            TableEvent::ToggleAll => {
                let changed = self.toggle_select_all();
                self.selection_message(changed)
            }
            TableEvent::ClearSelection => {
                let changed = self.clear_selection();
                self.selection_message(changed)
            }
            TableEvent::ToggleExpand(key) => {
                let changed = self.toggle_expand(&key);
                self.expansion_message(changed)
            }
            TableEvent::CollapseAll => {
                let changed = self.collapse_all();
                self.expansion_message(changed)
            }
            TableEvent::RowClick(key) => self
                .click_row(&key)
                .then_some(TableMessage::RowClicked(key)),
            TableEvent::RowAction { key, label } => self
                .run_row_action(&key, &label)
                .then_some(TableMessage::ActionInvoked(label)),
            TableEvent::BulkAction(label) => self
                .run_bulk_action(&label)
                .then_some(TableMessage::ActionInvoked(label)),
            TableEvent::ToggleColumn(key) => {
                let changed = self.toggle_column_visibility(&key).is_some();
                self.columns_message(changed)
            }
            TableEvent::ShowAllColumns => {
                self.show_all_columns();
                self.columns_message(true)
            }
            TableEvent::ResetColumns => {
                self.reset_columns();
                self.columns_message(true)
            }
            TableEvent::ResizeStart {
                key,
                position,
                measured_width,
            } => {
                self.begin_resize(&key, position.x, measured_width);
                None
            }
            TableEvent::Input(input) => self.handle_input(&input),
            TableEvent::DragStart(key) => self.drag_start(&key).map(TableMessage::DragStarted),
            TableEvent::DragOver(target) => Some(TableMessage::DragOver(self.drag_over(&target))),
            TableEvent::Drop { target, data } => {
                self.drop_column(&target, &data)
                    .then(|| TableMessage::ColumnReordered {
                        order: self.registry.order().to_vec(),
                    })
            }
            TableEvent::DragEnd => {
                self.drag_end();
                None
            }
            TableEvent::Export { scope, columns } => match self.export(scope, &columns) {
                Ok(file) => Some(TableMessage::Exported(file)),
                Err(err) => {
                    log::warn!("export failed: {err}");
                    Some(TableMessage::ExportFailed(err.to_string()))
                }
            },
        }
    }

    fn handle_input(&mut self, input: &Event) -> Option<TableMessage> {
        match input {
            Event::PointerMove { position, .. } => self
                .resize_to(position.x)
                .map(|(key, width)| TableMessage::ColumnResized { key, width }),
            Event::Scroll { scroll_top } => {
                self.set_scroll_top(*scroll_top);
                Some(TableMessage::WindowChanged(self.window()))
            }
            Event::ViewportResize { height } => {
                self.set_viewport_height(*height);
                Some(TableMessage::WindowChanged(self.window()))
            }
            other if other.ends_pointer_sequence() => self
                .end_resize()
                .map(|(key, width)| TableMessage::ResizeEnded { key, width }),
            _ => None,
        }
    }

    fn page_message(&self, changed: bool) -> Option<TableMessage> {
        changed.then(|| TableMessage::PageChanged(self.page_info()))
    }

    fn filters_message(&self, changed: bool) -> Option<TableMessage> {
        changed.then(|| TableMessage::FiltersChanged {
            active_count: self.filter_state.active_count(),
            matching: self.filtered_rows().len(),
        })
    }

    fn selection_message(&self, changed: bool) -> Option<TableMessage> {
        changed.then(|| TableMessage::SelectionChanged {
            selected: self.selection.keys(),
        })
    }

    fn expansion_message(&self, changed: bool) -> Option<TableMessage> {
        changed.then(|| TableMessage::ExpansionChanged {
            expanded: self.expansion.keys(),
        })
    }

    fn columns_message(&self, changed: bool) -> Option<TableMessage> {
        changed.then(|| TableMessage::ColumnsChanged {
            visible: self
                .registry
                .visible_columns()
                .iter()
                .map(|c| c.key.clone())
                .collect(),
        })
    }
}
