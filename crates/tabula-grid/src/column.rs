//! Column definitions and the column registry.
//!
//! The registry owns the three pieces of derived column state (order, widths,
//! hidden set) and keeps them reconciled with whatever column list the caller
//! currently declares.

use crate::cell::{CellValue, SortPrimitive, PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Width assumed for a column whose width is not yet known.
///
/// Sticky offsets and resize starting widths both fall back to this value so
/// that pinned columns line up with what the renderer draws.
pub const DEFAULT_COLUMN_WIDTH: f32 = 160.0;

/// Extracts a typed value from a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Produces the display text of a cell from a row and its index on the page.
pub type Renderer<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Declared column width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnWidth {
    /// Width in pixels
    Pixels(f32),
    /// Any CSS length (`"120px"`, `"20%"`, `"auto"`)
    Css(String),
}

impl ColumnWidth {
    /// Pixel value of the declared width, when it has one.
    #[must_use]
    pub fn pixels(&self) -> Option<f32> {
        let px = match self {
            Self::Pixels(px) => Some(*px),
            Self::Css(css) => {
                let css = css.trim();
                css.strip_suffix("px")
                    .unwrap_or(css)
                    .trim()
                    .parse::<f32>()
                    .ok()
            }
        };
        px.filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// Edge a sticky column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StickySide {
    /// Pinned to the left edge
    Left,
    /// Pinned to the right edge
    Right,
}

/// Text alignment within a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Column definition for a data table.
///
/// A column may carry any combination of an accessor, a renderer and an
/// export accessor; each is optional.
pub struct ColumnDef<T> {
    /// Column key, unique within the column set
    pub key: String,
    /// Display header
    pub header: String,
    /// Whether the header toggles sorting
    pub sortable: bool,
    /// Declared width (None = intrinsic)
    pub width: Option<ColumnWidth>,
    /// Minimum width for resizing
    pub min_width: Option<f32>,
    /// Maximum width for resizing
    pub max_width: Option<f32>,
    /// Hidden until the user shows it
    pub default_hidden: bool,
    /// Edge the column is pinned to
    pub sticky: Option<StickySide>,
    /// Whether the column can be resized
    pub resizable: bool,
    /// Whether the column can be dragged to a new position
    pub reorderable: bool,
    /// Text alignment
    pub align: TextAlign,
    accessor: Option<Accessor<T>>,
    render: Option<Renderer<T>>,
    export_value: Option<Accessor<T>>,
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            width: self.width.clone(),
            min_width: self.min_width,
            max_width: self.max_width,
            default_hidden: self.default_hidden,
            sticky: self.sticky,
            resizable: self.resizable,
            reorderable: self.reorderable,
            align: self.align,
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            export_value: self.export_value.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("sticky", &self.sticky)
            .field("has_accessor", &self.has_accessor())
            .field("has_render", &self.has_render())
            .field("has_export_value", &self.has_export_value())
            .finish_non_exhaustive()
    }
}

impl<T> ColumnDef<T> {
    /// Create a new column.
    #[must_use]
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            width: None,
            min_width: None,
            max_width: None,
            default_hidden: false,
            sticky: None,
            resizable: true,
            reorderable: true,
            align: TextAlign::Left,
            accessor: None,
            render: None,
            export_value: None,
        }
    }

    /// Make column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set column width in pixels.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(ColumnWidth::Pixels(width));
        self
    }

    /// Set column width as a CSS length.
    #[must_use]
    pub fn css_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(ColumnWidth::Css(width.into()));
        self
    }

    /// Set minimum resize width.
    #[must_use]
    pub const fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Set maximum resize width.
    #[must_use]
    pub const fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Hide the column by default.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.default_hidden = true;
        self
    }

    /// Pin the column to an edge.
    #[must_use]
    pub const fn sticky(mut self, side: StickySide) -> Self {
        self.sticky = Some(side);
        self
    }

    /// Allow or forbid resizing.
    #[must_use]
    pub const fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Allow or forbid reordering.
    #[must_use]
    pub const fn reorderable(mut self, reorderable: bool) -> Self {
        self.reorderable = reorderable;
        self
    }

    /// Set text alignment.
    #[must_use]
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set the value accessor used for sorting, export and default rendering.
    #[must_use]
    pub fn accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Set the cell renderer.
    #[must_use]
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Set a dedicated export accessor.
    #[must_use]
    pub fn export_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        self.export_value = Some(Arc::new(f));
        self
    }

    /// Whether the column has a value accessor.
    #[must_use]
    pub const fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    /// Whether the column has a renderer.
    #[must_use]
    pub const fn has_render(&self) -> bool {
        self.render.is_some()
    }

    /// Whether the column has an export accessor.
    #[must_use]
    pub const fn has_export_value(&self) -> bool {
        self.export_value.is_some()
    }

    /// Value of the column for `row`, if it has an accessor.
    pub fn value(&self, row: &T) -> Option<CellValue> {
        self.accessor.as_ref().map(|f| f(row))
    }

    /// Display text for the cell.
    ///
    /// Renderer first, then the accessor's display text, then [`PLACEHOLDER`].
    pub fn render_cell(&self, row: &T, row_index: usize) -> String {
        if let Some(render) = &self.render {
            return render(row, row_index);
        }
        match self.value(row) {
            Some(value) if !value.is_empty() => value.display(),
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// Exported field for the cell, reduced to its sort primitive.
    ///
    /// Export accessor first, then the value accessor, then rendered text.
    pub fn export_cell(&self, row: &T, row_index: usize) -> SortPrimitive {
        if let Some(export) = &self.export_value {
            return export(row).sort_primitive();
        }
        if let Some(value) = self.value(row) {
            return value.sort_primitive();
        }
        match &self.render {
            Some(render) => SortPrimitive::Text(render(row, row_index)),
            None => SortPrimitive::Text(String::new()),
        }
    }

    /// Declared width in pixels, if parseable.
    #[must_use]
    pub fn declared_pixels(&self) -> Option<f32> {
        self.width.as_ref().and_then(ColumnWidth::pixels)
    }
}

/// Horizontal space taken by fixed gutter columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gutters {
    /// Selection checkbox and expander columns before the data columns
    pub leading: f32,
    /// Row actions column after the data columns
    pub trailing: f32,
}

/// Offset of a sticky column from its pinned edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyOffset {
    /// Edge the offset is measured from
    pub side: StickySide,
    /// Distance in pixels
    pub offset: f32,
}

/// Ordered, width-resolved view over the caller's columns.
pub struct ColumnRegistry<T> {
    columns: Vec<ColumnDef<T>>,
    order: Vec<String>,
    widths: HashMap<String, f32>,
    hidden: BTreeSet<String>,
    default_width: f32,
}

impl<T> Clone for ColumnRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            order: self.order.clone(),
            widths: self.widths.clone(),
            hidden: self.hidden.clone(),
            default_width: self.default_width,
        }
    }
}

impl<T> fmt::Debug for ColumnRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnRegistry")
            .field("order", &self.order)
            .field("widths", &self.widths)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

impl<T> Default for ColumnRegistry<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> ColumnRegistry<T> {
    /// Create a registry seeded from declared columns.
    #[must_use]
    pub fn new(columns: Vec<ColumnDef<T>>) -> Self {
        Self::with_default_width(columns, DEFAULT_COLUMN_WIDTH)
    }

    /// Create a registry with a custom fallback width.
    #[must_use]
    pub fn with_default_width(columns: Vec<ColumnDef<T>>, default_width: f32) -> Self {
        let mut registry = Self {
            columns: Vec::new(),
            order: Vec::new(),
            widths: HashMap::new(),
            hidden: BTreeSet::new(),
            default_width: if default_width.is_finite() && default_width > 0.0 {
                default_width
            } else {
                DEFAULT_COLUMN_WIDTH
            },
        };
        registry.reconcile(columns);
        registry
    }

    /// Replace the declared columns, keeping user state for retained keys.
    ///
    /// Retained keys keep their relative order, custom width and visibility.
    /// New keys are appended and seeded from their declared width and
    /// `default_hidden`. Removed keys are dropped from every piece of state.
    pub fn reconcile(&mut self, columns: Vec<ColumnDef<T>>) {
        let mut seen = HashSet::new();
        let columns: Vec<ColumnDef<T>> = columns
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.key.clone());
                if !fresh {
                    log::warn!("duplicate column key {:?} ignored", c.key);
                }
                fresh
            })
            .collect();

        let previous: HashSet<&str> = self.order.iter().map(String::as_str).collect();
        let mut order: Vec<String> = self
            .order
            .iter()
            .filter(|key| seen.contains(key.as_str()))
            .cloned()
            .collect();

        for column in columns.iter().filter(|c| !previous.contains(c.key.as_str())) {
            order.push(column.key.clone());
            if let Some(px) = column.declared_pixels() {
                self.widths.insert(column.key.clone(), px);
            }
            if column.default_hidden {
                self.hidden.insert(column.key.clone());
            }
        }

        self.widths.retain(|key, _| seen.contains(key.as_str()));
        self.hidden.retain(|key| seen.contains(key.as_str()));
        log::debug!(
            "reconciled columns: {} declared, {} previously ordered",
            order.len(),
            self.order.len()
        );
        self.order = order;
        self.columns = columns;
    }

    /// Restore declared order, declared widths and default visibility.
    pub fn reset(&mut self) {
        let columns = std::mem::take(&mut self.columns);
        self.order.clear();
        self.widths.clear();
        self.hidden.clear();
        self.reconcile(columns);
    }

    /// Declared columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    /// Look up a column by key.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Current column order.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Columns in display order, hidden ones included.
    #[must_use]
    pub fn ordered_columns(&self) -> Vec<&ColumnDef<T>> {
        self.order.iter().filter_map(|key| self.column(key)).collect()
    }

    /// Columns in display order, hidden ones excluded.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&ColumnDef<T>> {
        self.order
            .iter()
            .filter(|key| !self.hidden.contains(key.as_str()))
            .filter_map(|key| self.column(key))
            .collect()
    }

    /// Whether the column is hidden.
    #[must_use]
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    /// Keys currently hidden.
    #[must_use]
    pub const fn hidden(&self) -> &BTreeSet<String> {
        &self.hidden
    }

    /// Flip a column's visibility. Returns the new hidden state, or `None`
    /// for unknown keys.
    pub fn toggle_visibility(&mut self, key: &str) -> Option<bool> {
        self.column(key)?;
        if self.hidden.remove(key) {
            Some(false)
        } else {
            self.hidden.insert(key.to_string());
            Some(true)
        }
    }

    /// Show every column.
    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    /// Resolved width, if known.
    #[must_use]
    pub fn width(&self, key: &str) -> Option<f32> {
        self.widths.get(key).copied()
    }

    /// Width map (key → pixels) for columns with a known width.
    #[must_use]
    pub const fn widths(&self) -> &HashMap<String, f32> {
        &self.widths
    }

    /// Resolved width, or the fallback width when unknown.
    #[must_use]
    pub fn resolved_width(&self, key: &str) -> f32 {
        self.width(key).unwrap_or(self.default_width)
    }

    /// Fallback width for columns without a resolved width.
    #[must_use]
    pub const fn default_width(&self) -> f32 {
        self.default_width
    }

    /// Write a width for one column. Ignores unknown keys and non-finite widths.
    pub fn set_width(&mut self, key: &str, width: f32) -> bool {
        if !width.is_finite() || width < 0.0 || self.column(key).is_none() {
            return false;
        }
        self.widths.insert(key.to_string(), width);
        true
    }

    /// Move `source` to the position currently held by `target`.
    pub fn move_column(&mut self, source: &str, target: &str) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(to)) = (
            self.order.iter().position(|k| k == source),
            self.order.iter().position(|k| k == target),
        ) else {
            return false;
        };
        let key = self.order.remove(from);
        let to = to.min(self.order.len());
        self.order.insert(to, key);
        true
    }

    /// Offsets of every visible sticky column from its pinned edge.
    ///
    /// Left offsets accumulate in display order after the leading gutter;
    /// right offsets accumulate in reverse order after the trailing gutter.
    #[must_use]
    pub fn sticky_offsets(&self, gutters: Gutters) -> HashMap<String, StickyOffset> {
        let visible = self.visible_columns();
        let mut offsets = HashMap::new();

        let mut left = gutters.leading;
        for column in visible
            .iter()
            .filter(|c| c.sticky == Some(StickySide::Left))
        {
            offsets.insert(
                column.key.clone(),
                StickyOffset {
                    side: StickySide::Left,
                    offset: left,
                },
            );
            left += self.resolved_width(&column.key);
        }

        let mut right = gutters.trailing;
        for column in visible
            .iter()
            .rev()
            .filter(|c| c.sticky == Some(StickySide::Right))
        {
            offsets.insert(
                column.key.clone(),
                StickyOffset {
                    side: StickySide::Right,
                    offset: right,
                },
            );
            right += self.resolved_width(&column.key);
        }

        offsets
    }
}
