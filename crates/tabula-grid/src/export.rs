//! CSV export of a row subset.

use crate::column::ColumnDef;
use crate::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// UTF-8 byte-order mark written ahead of the CSV text.
pub const UTF8_BOM: char = '\u{FEFF}';

/// MIME type of exported files.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// Which rows an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Rows on the shown page
    Page,
    /// Every row that passes the filters, in sorted order
    #[default]
    Filtered,
    /// Every row, unfiltered and unsorted
    All,
}

impl ExportScope {
    /// Name substituted for `{mode}` in filename templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Filtered => "filtered",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which columns an export covers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportColumns {
    /// Columns currently visible, in display order
    #[default]
    Visible,
    /// Explicit column keys, in the given order
    Keys(Vec<String>),
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Filename template; `{mode}` becomes `page`, `filtered` or `all`
    pub filename_template: String,
    /// Prefix the CSV with a UTF-8 byte-order mark
    pub include_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_template: "export-{mode}.csv".to_string(),
            include_bom: true,
        }
    }
}

impl ExportConfig {
    /// Filename for an export of `scope`.
    #[must_use]
    pub fn filename(&self, scope: ExportScope) -> String {
        self.filename_template.replace("{mode}", scope.as_str())
    }
}

/// A finished export, ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested filename
    pub filename: String,
    /// MIME type
    pub mime_type: &'static str,
    /// CSV text
    pub contents: String,
}

impl ExportFile {
    /// Write the file into `dir`, returning its path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> GridResult<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, self.contents.as_bytes())?;
        log::debug!("saved export {} ({} bytes)", path.display(), self.contents.len());
        Ok(path)
    }

    /// Contents without the byte-order mark.
    #[must_use]
    pub fn text(&self) -> &str {
        self.contents.strip_prefix(UTF8_BOM).unwrap_or(&self.contents)
    }
}

/// Encode `rows` under `columns` as CSV.
///
/// The header row holds column headers. Each field is the column's export
/// value reduced to its sort primitive; fields containing a comma, quote or
/// newline are quoted with inner quotes doubled. Zero rows yield a
/// header-only document.
pub fn encode_csv<T>(rows: &[&T], columns: &[&ColumnDef<T>], include_bom: bool) -> GridResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if !columns.is_empty() {
        writer.write_record(columns.iter().map(|c| c.header.as_str()))?;
        for (index, row) in rows.iter().enumerate() {
            writer.write_record(columns.iter().map(|c| c.export_cell(row, index).to_string()))?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| GridError::Io(e.into_error()))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| GridError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    let mut out = String::with_capacity(body.len() + UTF8_BOM.len_utf8());
    if include_bom {
        out.push(UTF8_BOM);
    }
    out.push_str(&body);
    Ok(out)
}
