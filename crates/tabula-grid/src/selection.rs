//! Keyed row ledgers for selection and expansion.
//!
//! Rows are never flagged directly; a ledger holds the keys of the rows that
//! are selected (or expanded), so it survives filtering, sorting, paging and
//! wholesale replacement of the row set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tri-state checkbox value for a "select all" header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckState {
    /// Nothing on the page is selected
    #[default]
    Unchecked,
    /// Every row on the page is selected
    Checked,
    /// Some but not all rows on the page are selected
    Indeterminate,
}

impl CheckState {
    /// Check if checked (true for Checked, false for others).
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        matches!(self, Self::Checked)
    }

    /// Check if indeterminate.
    #[must_use]
    pub const fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

/// Set of row keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLedger {
    keys: BTreeSet<String>,
}

impl KeyLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is in the ledger.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Flip membership of `key`. Returns the new membership.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.to_string());
            true
        }
    }

    /// Add `key`. Returns whether it was absent.
    pub fn insert(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    /// Remove `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    /// Select-all over one page.
    ///
    /// When every page key is already present exactly those keys are removed,
    /// otherwise all of them are added. Keys from other pages are untouched.
    /// Returns whether the ledger changed.
    pub fn toggle_all<'k, I>(&mut self, page_keys: I) -> bool
    where
        I: IntoIterator<Item = &'k str>,
    {
        let page: Vec<&str> = page_keys.into_iter().collect();
        if page.is_empty() {
            return false;
        }
        if page.iter().all(|k| self.keys.contains(*k)) {
            for key in page {
                self.keys.remove(key);
            }
        } else {
            for key in page {
                self.keys.insert(key.to_string());
            }
        }
        true
    }

    /// Tri-state of the page's keys.
    #[must_use]
    pub fn page_state<'k, I>(&self, page_keys: I) -> CheckState
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut total = 0usize;
        let mut present = 0usize;
        for key in page_keys {
            total += 1;
            if self.keys.contains(key) {
                present += 1;
            }
        }
        if present == 0 {
            CheckState::Unchecked
        } else if present == total {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }

    /// Remove every key. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.keys.is_empty();
        self.keys.clear();
        had_any
    }

    /// Keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }

    /// Iterate over keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
