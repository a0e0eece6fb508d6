//! Cell values and the type-aware comparator used for sorting and export.

use chrono::{DateTime, Utc};
use icu_collator::{Collator, CollatorOptions, Numeric, Strength};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Text shown for a cell whose column cannot produce a value.
pub const PLACEHOLDER: &str = "—";

/// A cell value extracted from a row by a column accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Date(DateTime<Utc>),
    /// Empty cell
    Empty,
}

impl CellValue {
    /// Get display text for the cell.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d %H:%M").to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Whether the cell carries no value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Reduce the value to the primitive it sorts and exports as.
    ///
    /// Dates become epoch milliseconds, booleans 0/1, numbers stay numbers and
    /// everything else is compared as text.
    #[must_use]
    pub fn sort_primitive(&self) -> SortPrimitive {
        match self {
            Self::Number(n) => SortPrimitive::Number(*n),
            Self::Bool(b) => SortPrimitive::Number(if *b { 1.0 } else { 0.0 }),
            Self::Date(d) => SortPrimitive::Number(d.timestamp_millis() as f64),
            Self::Text(s) => SortPrimitive::Text(s.clone()),
            Self::Empty => SortPrimitive::Text(String::new()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl<V: Into<Self>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Comparison primitive derived from a [`CellValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum SortPrimitive {
    /// Numeric primitive
    Number(f64),
    /// Text primitive
    Text(String),
}

impl SortPrimitive {
    /// Compare two primitives.
    ///
    /// Two numbers compare numerically; any other pairing compares the
    /// stringified forms with [`natural_cmp`].
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => natural_cmp(&self.to_string(), &other.to_string()),
        }
    }
}

impl fmt::Display for SortPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{n}")
    }
}

thread_local! {
    static COLLATOR: Option<Collator> = text_collator();
}

fn text_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    options.numeric = Some(Numeric::On);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            log::warn!("root collation unavailable, comparing code points: {err:?}");
            None
        }
    }
}

/// Unicode collation over the root locale, ignoring case and ordering
/// embedded digit runs by value, so `"item2"` sorts before `"item10"` and
/// `"éclair"` before `"zebra"`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    })
}
