//! Table configuration loaded from YAML or JSON.
//!
//! ```yaml
//! rows_per_page_options: [25, 50]
//! default_rows_per_page: 25
//! virtualize:
//!   row_height: 36
//! export:
//!   filename_template: "knowledge-{mode}.csv"
//! ```

use crate::column::{Gutters, DEFAULT_COLUMN_WIDTH};
use crate::error::{GridError, GridResult};
use crate::export::ExportConfig;
use serde::{Deserialize, Serialize};
use tabula_core::{ResizeBounds, WindowConfig, DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH};

/// Copy shown when the table has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptyCopy {
    /// Headline
    pub title: String,
    /// Supporting text
    pub description: Option<String>,
    /// Illustration identifier
    pub illustration: Option<String>,
    /// Label of the call-to-action button
    pub action_label: Option<String>,
}

impl EmptyCopy {
    /// Copy with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Page sizes offered to the user
    pub rows_per_page_options: Vec<usize>,
    /// Initial page size
    pub default_rows_per_page: usize,
    /// Row virtualization (off when absent)
    pub virtualize: Option<WindowConfig>,
    /// Initial viewport height for virtualization
    pub viewport_height: f32,
    /// Width assumed for columns without a resolved width
    pub default_column_width: f32,
    /// Minimum width for columns that declare none
    pub resize_min_width: f32,
    /// Maximum width for columns that declare none
    pub resize_max_width: f32,
    /// Width of the selection checkbox column
    pub selection_gutter: f32,
    /// Width of the row expander column
    pub expander_gutter: f32,
    /// Width of the row actions column
    pub actions_gutter: f32,
    /// Table-level switch for column resizing
    pub resizable_columns: bool,
    /// Table-level switch for column reordering
    pub reorderable_columns: bool,
    /// Export settings
    pub export: ExportConfig,
    /// Shown when there are no rows at all
    pub empty: EmptyCopy,
    /// Shown when filters exclude every row
    pub no_results: EmptyCopy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page_options: vec![10, 20, 50, 100],
            default_rows_per_page: 10,
            virtualize: None,
            viewport_height: 600.0,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            resize_min_width: DEFAULT_MIN_WIDTH,
            resize_max_width: DEFAULT_MAX_WIDTH,
            selection_gutter: 40.0,
            expander_gutter: 40.0,
            actions_gutter: 96.0,
            resizable_columns: true,
            reorderable_columns: true,
            export: ExportConfig::default(),
            empty: EmptyCopy::titled("No data"),
            no_results: EmptyCopy::titled("No matching results"),
        }
    }
}

impl TableConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml(yaml: &str) -> GridResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        log::debug!("loaded table config from YAML: {config:?}");
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> GridResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("loaded table config from JSON: {config:?}");
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> GridResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> GridResult<()> {
        if self.rows_per_page_options.is_empty() {
            return Err(GridError::invalid("rows_per_page_options", "must not be empty"));
        }
        if self.rows_per_page_options.contains(&0) || self.default_rows_per_page == 0 {
            return Err(GridError::invalid("rows_per_page_options", "page size must be positive"));
        }
        if !self.rows_per_page_options.contains(&self.default_rows_per_page) {
            return Err(GridError::invalid(
                "default_rows_per_page",
                format!(
                    "{} is not one of {:?}",
                    self.default_rows_per_page, self.rows_per_page_options
                ),
            ));
        }
        if let Some(window) = &self.virtualize {
            if !(window.row_height.is_finite() && window.row_height > 0.0) {
                return Err(GridError::invalid("virtualize.row_height", "must be positive"));
            }
        }
        if !(self.default_column_width.is_finite() && self.default_column_width > 0.0) {
            return Err(GridError::invalid("default_column_width", "must be positive"));
        }
        if self.resize_min_width > self.resize_max_width {
            return Err(GridError::invalid(
                "resize_min_width",
                format!(
                    "{} exceeds resize_max_width {}",
                    self.resize_min_width, self.resize_max_width
                ),
            ));
        }
        Ok(())
    }

    /// Fallback resize limits.
    #[must_use]
    pub const fn resize_bounds(&self) -> ResizeBounds {
        ResizeBounds {
            min: self.resize_min_width,
            max: self.resize_max_width,
        }
    }

    /// Gutter widths for a table with the given optional columns.
    #[must_use]
    pub fn gutters(&self, selectable: bool, expandable: bool, has_actions: bool) -> Gutters {
        let mut leading = 0.0;
        if selectable {
            leading += self.selection_gutter;
        }
        if expandable {
            leading += self.expander_gutter;
        }
        Gutters {
            leading,
            trailing: if has_actions { self.actions_gutter } else { 0.0 },
        }
    }
}
