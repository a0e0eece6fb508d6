//! Single-column sort stage.

use crate::cell::SortPrimitive;
use crate::column::ColumnDef;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Key of the sorted column
    pub key: Option<String>,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortState {
    /// Sort by `key` in `direction`.
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Header click: flip direction on the active column, otherwise switch to
    /// `key` ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    /// Remove the active sort.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Direction shown on `key`'s header, if it is the active column.
    #[must_use]
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }
}

/// Stable sort of `rows` by `column` in `direction`.
///
/// Returns a new sequence and leaves `rows` untouched. Without a column, or
/// with a column that has no accessor, the order is passed through.
pub fn sort_rows<'a, T>(
    rows: &[&'a T],
    column: Option<&ColumnDef<T>>,
    direction: SortDirection,
) -> Vec<&'a T> {
    let Some(column) = column.filter(|c| c.has_accessor()) else {
        return rows.to_vec();
    };

    let mut keyed: Vec<(SortPrimitive, &'a T)> = rows
        .iter()
        .map(|row| {
            let primitive = column
                .value(row)
                .map_or(SortPrimitive::Text(String::new()), |v| v.sort_primitive());
            (primitive, *row)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, row)| row).collect()
}
