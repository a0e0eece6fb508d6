//! Filter pipeline: simple filter, faceted filters and free-text search.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Extracts the string a filter matches against.
pub type KeyAccessor<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// One selectable filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Value compared against the accessor output
    pub value: String,
    /// Display label
    pub label: String,
}

impl FilterOption {
    /// Create a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Single-select filter (e.g. a status dropdown).
pub struct SimpleFilter<T> {
    /// Selectable values
    pub options: Vec<FilterOption>,
    accessor: KeyAccessor<T>,
}

impl<T> SimpleFilter<T> {
    /// Create a simple filter.
    pub fn new<F>(options: Vec<FilterOption>, accessor: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            options,
            accessor: Arc::new(accessor),
        }
    }

    /// Whether `row` matches `value` exactly.
    pub fn matches(&self, row: &T, value: &str) -> bool {
        (self.accessor)(row) == value
    }
}

/// Multi-select filter dimension.
pub struct FacetDef<T> {
    /// Facet key
    pub key: String,
    /// Display label
    pub label: String,
    /// Selectable values
    pub options: Vec<FilterOption>,
    accessor: KeyAccessor<T>,
}

impl<T> FacetDef<T> {
    /// Create a facet.
    pub fn new<F>(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
        accessor: F,
    ) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            options,
            accessor: Arc::new(accessor),
        }
    }

    /// Facet value of `row`.
    pub fn value(&self, row: &T) -> String {
        (self.accessor)(row)
    }
}

impl<T> fmt::Debug for FacetDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetDef")
            .field("key", &self.key)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Free-text search over one string per row.
pub struct SearchDef<T> {
    /// Placeholder shown in the search box
    pub placeholder: String,
    accessor: KeyAccessor<T>,
}

impl<T> SearchDef<T> {
    /// Create a search definition.
    pub fn new<F>(placeholder: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            placeholder: placeholder.into(),
            accessor: Arc::new(accessor),
        }
    }

    /// Whether `row` contains the lowercase `needle`.
    pub fn matches(&self, row: &T, needle: &str) -> bool {
        (self.accessor)(row).to_lowercase().contains(needle)
    }
}

/// Filter values chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected simple-filter value
    pub active_filter: Option<String>,
    /// Selected values per facet
    pub faceted: BTreeMap<String, BTreeSet<String>>,
    /// Search text
    pub search: String,
}

impl FilterState {
    /// Whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_filter.is_none() && self.faceted.is_empty() && self.search_needle().is_none()
    }

    /// Number of active filter sources, counting each facet separately.
    #[must_use]
    pub fn active_count(&self) -> usize {
        usize::from(self.active_filter.is_some())
            + self.faceted.len()
            + usize::from(self.search_needle().is_some())
    }

    /// Lowercased, trimmed search text, if any.
    #[must_use]
    pub fn search_needle(&self) -> Option<String> {
        let needle = self.search.trim();
        (!needle.is_empty()).then(|| needle.to_lowercase())
    }

    /// Select (or clear) the simple-filter value. Returns whether it changed.
    pub fn set_active_filter(&mut self, value: Option<String>) -> bool {
        if self.active_filter == value {
            return false;
        }
        self.active_filter = value;
        true
    }

    /// Flip one value of a facet.
    pub fn toggle_facet(&mut self, facet: &str, value: &str) {
        let values = self.faceted.entry(facet.to_string()).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if values.is_empty() {
            self.faceted.remove(facet);
        }
    }

    /// Replace a facet's selection. Returns whether it changed.
    pub fn set_facet(&mut self, facet: &str, values: BTreeSet<String>) -> bool {
        let changed = self.faceted.get(facet).map_or(!values.is_empty(), |v| *v != values);
        if values.is_empty() {
            self.faceted.remove(facet);
        } else {
            self.faceted.insert(facet.to_string(), values);
        }
        changed
    }

    /// Clear one facet. Returns whether it had a selection.
    pub fn clear_facet(&mut self, facet: &str) -> bool {
        self.faceted.remove(facet).is_some()
    }

    /// Set search text. Returns whether it changed.
    pub fn set_search(&mut self, search: &str) -> bool {
        if self.search == search {
            return false;
        }
        self.search = search.to_string();
        true
    }

    /// Clear every filter. Returns whether anything was active.
    pub fn clear_all(&mut self) -> bool {
        let had_any = !self.is_empty() || !self.search.is_empty();
        *self = Self::default();
        had_any
    }
}

/// The filter sources a table declares.
pub struct FilterSet<T> {
    simple: Option<SimpleFilter<T>>,
    facets: Vec<FacetDef<T>>,
    search: Option<SearchDef<T>>,
}

impl<T> Default for FilterSet<T> {
    fn default() -> Self {
        Self {
            simple: None,
            facets: Vec::new(),
            search: None,
        }
    }
}

impl<T> FilterSet<T> {
    /// Create an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the simple filter.
    #[must_use]
    pub fn simple(mut self, filter: SimpleFilter<T>) -> Self {
        self.simple = Some(filter);
        self
    }

    /// Add a facet.
    #[must_use]
    pub fn facet(mut self, facet: FacetDef<T>) -> Self {
        self.facets.push(facet);
        self
    }

    /// Set the search definition.
    #[must_use]
    pub fn search(mut self, search: SearchDef<T>) -> Self {
        self.search = Some(search);
        self
    }

    /// Get the simple filter.
    #[must_use]
    pub const fn get_simple(&self) -> Option<&SimpleFilter<T>> {
        self.simple.as_ref()
    }

    /// Get the facets.
    #[must_use]
    pub fn get_facets(&self) -> &[FacetDef<T>] {
        &self.facets
    }

    /// Get the search definition.
    #[must_use]
    pub const fn get_search(&self) -> Option<&SearchDef<T>> {
        self.search.as_ref()
    }

    /// Apply every active filter to `rows`.
    pub fn apply<'a>(&self, rows: &'a [T], state: &FilterState) -> Vec<&'a T> {
        self.apply_except(rows, state, None)
    }

    /// Apply every active filter except the facet named `skip_facet`.
    ///
    /// Stages run in a fixed order (simple, facets, search) and a stage with no
    /// active state is skipped outright.
    fn apply_except<'a>(
        &self,
        rows: &'a [T],
        state: &FilterState,
        skip_facet: Option<&str>,
    ) -> Vec<&'a T> {
        let mut out: Vec<&'a T> = rows.iter().collect();

        if let (Some(filter), Some(value)) = (&self.simple, &state.active_filter) {
            out.retain(|row| filter.matches(row, value));
        }

        for facet in &self.facets {
            if Some(facet.key.as_str()) == skip_facet {
                continue;
            }
            match state.faceted.get(&facet.key) {
                Some(selected) if !selected.is_empty() => {
                    out.retain(|row| selected.contains(&facet.value(row)));
                }
                _ => {}
            }
        }

        if let (Some(search), Some(needle)) = (&self.search, state.search_needle()) {
            out.retain(|row| search.matches(row, &needle));
        }

        out
    }

    /// Per-option row counts for a facet under all the other active filters.
    pub fn facet_counts(&self, rows: &[T], state: &FilterState, facet_key: &str) -> Vec<(FilterOption, usize)> {
        let Some(facet) = self.facets.iter().find(|f| f.key == facet_key) else {
            return Vec::new();
        };
        let candidates = self.apply_except(rows, state, Some(facet_key));
        let mut tally: BTreeMap<String, usize> = BTreeMap::new();
        for row in candidates {
            *tally.entry(facet.value(row)).or_default() += 1;
        }
        facet
            .options
            .iter()
            .map(|option| {
                let count = tally.get(&option.value).copied().unwrap_or(0);
                (option.clone(), count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Kb {
        name: &'static str,
        status: &'static str,
        kind: &'static str,
    }

    fn rows() -> Vec<Kb> {
        vec![
            Kb { name: "Product Docs", status: "enabled", kind: "pdf" },
            Kb { name: "HR Policies", status: "disabled", kind: "docx" },
            Kb { name: "Support FAQ", status: "enabled", kind: "md" },
            Kb { name: "Release Notes", status: "enabled", kind: "pdf" },
            Kb { name: "Legal", status: "disabled", kind: "pdf" },
        ]
    }

    fn filters() -> FilterSet<Kb> {
        FilterSet::new()
            .simple(SimpleFilter::new(
                vec![
                    FilterOption::new("enabled", "Enabled"),
                    FilterOption::new("disabled", "Disabled"),
                ],
                |r: &Kb| r.status.to_string(),
            ))
            .facet(FacetDef::new(
                "kind",
                "Type",
                vec![
                    FilterOption::new("pdf", "PDF"),
                    FilterOption::new("docx", "Word"),
                    FilterOption::new("md", "Markdown"),
                ],
                |r: &Kb| r.kind.to_string(),
            ))
            .search(SearchDef::new("Search…", |r: &Kb| r.name.to_string()))
    }

    fn names(rows: &[&Kb]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    // ===== FilterState Tests =====

    #[test]
    fn test_filter_state_default_empty() {
        let state = FilterState::default();
        assert!(state.is_empty());
        assert_eq!(state.active_count(), 0);
    }

    #[test]
    fn test_filter_state_whitespace_search_is_empty() {
        let mut state = FilterState::default();
        assert!(state.set_search("   "));
        assert!(state.is_empty());
        assert!(state.search_needle().is_none());
    }

    #[test]
    fn test_filter_state_toggle_facet() {
        let mut state = FilterState::default();
        state.toggle_facet("kind", "pdf");
        state.toggle_facet("kind", "md");
        assert_eq!(state.faceted["kind"].len(), 2);
        state.toggle_facet("kind", "pdf");
        state.toggle_facet("kind", "md");
        assert!(!state.faceted.contains_key("kind"));
    }

    #[test]
    fn test_filter_state_set_facet_and_clear() {
        let mut state = FilterState::default();
        let values: BTreeSet<String> = ["pdf".to_string()].into();
        assert!(state.set_facet("kind", values.clone()));
        assert!(!state.set_facet("kind", values));
        assert!(state.clear_facet("kind"));
        assert!(!state.clear_facet("kind"));
        assert!(!state.set_facet("kind", BTreeSet::new()));
    }

    #[test]
    fn test_filter_state_clear_all() {
        let mut state = FilterState::default();
        state.set_active_filter(Some("enabled".into()));
        state.toggle_facet("kind", "pdf");
        state.set_search("docs");
        assert_eq!(state.active_count(), 3);
        assert!(state.clear_all());
        assert!(state.is_empty());
        assert!(!state.clear_all());
    }

    // ===== Pipeline Tests =====

    #[test]
    fn test_apply_no_filters_passes_through() {
        let data = rows();
        let out = filters().apply(&data, &FilterState::default());
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_apply_simple_filter() {
        let data = rows();
        let state = FilterState {
            active_filter: Some("disabled".into()),
            ..Default::default()
        };
        assert_eq!(names(&filters().apply(&data, &state)), ["HR Policies", "Legal"]);
    }

    #[test]
    fn test_apply_facets_or_within_and_across() {
        let data = rows();
        let mut state = FilterState::default();
        state.toggle_facet("kind", "md");
        state.toggle_facet("kind", "docx");
        assert_eq!(
            names(&filters().apply(&data, &state)),
            ["HR Policies", "Support FAQ"]
        );

        state.set_active_filter(Some("enabled".into()));
        assert_eq!(names(&filters().apply(&data, &state)), ["Support FAQ"]);
    }

    #[test]
    fn test_apply_search_case_insensitive() {
        let data = rows();
        let mut state = FilterState::default();
        state.set_search("  NOTES ");
        assert_eq!(names(&filters().apply(&data, &state)), ["Release Notes"]);
    }

    #[test]
    fn test_apply_unknown_facet_state_ignored() {
        let data = rows();
        let mut state = FilterState::default();
        state.toggle_facet("owner", "alice");
        assert_eq!(filters().apply(&data, &state).len(), 5);
    }

    #[test]
    fn test_apply_idempotent() {
        let data = rows();
        let mut state = FilterState::default();
        state.toggle_facet("kind", "pdf");
        let set = filters();
        let once: Vec<Kb> = set.apply(&data, &state).into_iter().cloned().collect();
        let twice = set.apply(&once, &state);
        assert_eq!(names(&twice), once.iter().map(|r| r.name).collect::<Vec<_>>());
    }

    #[test]
    fn test_facet_counts_ignore_own_selection() {
        let data = rows();
        let mut state = FilterState::default();
        state.toggle_facet("kind", "pdf");
        state.set_active_filter(Some("enabled".into()));

        let counts = filters().facet_counts(&data, &state, "kind");
        let counts: Vec<(String, usize)> = counts.into_iter().map(|(o, n)| (o.value, n)).collect();
        assert_eq!(
            counts,
            [("pdf".to_string(), 2), ("docx".to_string(), 0), ("md".to_string(), 1)]
        );
        assert!(filters().facet_counts(&data, &state, "missing").is_empty());
    }
}
