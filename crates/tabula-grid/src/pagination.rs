//! Client-side pagination.
//!
//! The requested page is stored as-is; the page actually shown is clamped on
//! every read so a shrinking result set can never strand the user on an
//! out-of-range page.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Page size offered when a table declares no options.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Number of pages needed for `total` rows (at least one).
#[must_use]
pub const fn total_pages(total: usize, rows_per_page: usize) -> usize {
    let per = if rows_per_page == 0 { 1 } else { rows_per_page };
    let pages = total.div_ceil(per);
    if pages == 0 {
        1
    } else {
        pages
    }
}

/// Pagination state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    current_page: usize,
    rows_per_page: usize,
    options: Vec<usize>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(vec![10, 20, 50, 100], DEFAULT_ROWS_PER_PAGE)
    }
}

impl Pagination {
    /// Create pagination over a set of page-size options.
    #[must_use]
    pub fn new(options: Vec<usize>, rows_per_page: usize) -> Self {
        let mut options: Vec<usize> = options.into_iter().filter(|n| *n > 0).collect();
        options.sort_unstable();
        options.dedup();
        let mut pagination = Self {
            current_page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            options,
        };
        pagination.rows_per_page = pagination.snap(rows_per_page);
        pagination
    }

    /// Requested page (1-based, unclamped).
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    #[must_use]
    pub const fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Page-size options.
    #[must_use]
    pub fn options(&self) -> &[usize] {
        &self.options
    }

    /// Request a page. Zero is treated as the first page.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Go back to the first page. Returns whether the page changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.current_page != 1;
        self.current_page = 1;
        changed
    }

    /// Change the page size, snapped to the nearest option, and return to page 1.
    /// Returns whether the size or the page changed.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> bool {
        let snapped = self.snap(rows_per_page);
        let resized = snapped != self.rows_per_page;
        self.rows_per_page = snapped;
        self.reset() || resized
    }

    /// Page count for `total` rows.
    #[must_use]
    pub const fn total_pages(&self, total: usize) -> usize {
        total_pages(total, self.rows_per_page)
    }

    /// The requested page clamped into `[1, total_pages]`.
    #[must_use]
    pub fn safe_page(&self, total: usize) -> usize {
        self.current_page.clamp(1, self.total_pages(total))
    }

    /// Index range of the shown page within `total` rows.
    #[must_use]
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = (self.safe_page(total) - 1) * self.rows_per_page;
        let end = (start + self.rows_per_page).min(total);
        start.min(total)..end
    }

    /// Slice out the shown page.
    #[must_use]
    pub fn page<'s, R>(&self, rows: &'s [R]) -> &'s [R] {
        &rows[self.page_range(rows.len())]
    }

    /// Summary of the shown page.
    #[must_use]
    pub fn info(&self, total: usize) -> PageInfo {
        let range = self.page_range(total);
        PageInfo {
            page: self.safe_page(total),
            total_pages: self.total_pages(total),
            total_rows: total,
            first_row: if range.is_empty() { 0 } else { range.start + 1 },
            last_row: range.end,
        }
    }

    fn snap(&self, requested: usize) -> usize {
        let requested = requested.max(1);
        if self.options.is_empty() || self.options.contains(&requested) {
            return requested;
        }
        self.options
            .iter()
            .copied()
            .min_by_key(|n| n.abs_diff(requested))
            .unwrap_or(requested)
    }
}

/// Summary of the shown page ("Showing 11–20 of 25").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Shown page (1-based)
    pub page: usize,
    /// Page count
    pub total_pages: usize,
    /// Rows after filtering
    pub total_rows: usize,
    /// First shown row (1-based), 0 when empty
    pub first_row: usize,
    /// Last shown row (1-based, inclusive)
    pub last_row: usize,
}

impl PageInfo {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_pagination_default() {
        let p = Pagination::default();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.rows_per_page(), 10);
        assert_eq!(p.options(), [10, 20, 50, 100]);
    }

    #[test]
    fn test_pagination_new_cleans_options() {
        let p = Pagination::new(vec![50, 0, 10, 50, 25], 25);
        assert_eq!(p.options(), [10, 25, 50]);
        assert_eq!(p.rows_per_page(), 25);
    }

    #[test]
    fn test_pagination_snaps_to_option() {
        let mut p = Pagination::new(vec![10, 20, 50], 10);
        p.set_page(3);
        p.set_rows_per_page(45);
        assert_eq!(p.rows_per_page(), 50);
        assert_eq!(p.current_page(), 1);
        p.set_rows_per_page(0);
        assert_eq!(p.rows_per_page(), 10);
    }

    #[test]
    fn test_pagination_set_rows_per_page_reports_change() {
        let mut p = Pagination::new(vec![10, 20, 50], 10);
        assert!(!p.set_rows_per_page(10));
        assert!(!p.set_rows_per_page(12));
        assert!(p.set_rows_per_page(20));

        p.set_page(2);
        assert!(p.set_rows_per_page(20));
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_pagination_safe_page_clamps() {
        let mut p = Pagination::new(vec![10], 10);
        p.set_page(4);
        assert_eq!(p.current_page(), 4);
        assert_eq!(p.safe_page(25), 3);
        assert_eq!(p.page_range(25), 20..25);
        assert_eq!(p.safe_page(0), 1);
        assert_eq!(p.page_range(0), 0..0);
    }

    #[test]
    fn test_pagination_set_page_zero() {
        let mut p = Pagination::default();
        p.set_page(0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_pagination_page_slice() {
        let rows: Vec<u32> = (1..=25).collect();
        let mut p = Pagination::new(vec![10], 10);
        p.set_page(2);
        assert_eq!(p.page(&rows), (11..=20).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_pagination_reset() {
        let mut p = Pagination::default();
        assert!(!p.reset());
        p.set_page(2);
        assert!(p.reset());
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_page_info() {
        let mut p = Pagination::new(vec![10], 10);
        p.set_page(2);
        let info = p.info(25);
        assert_eq!(
            info,
            PageInfo {
                page: 2,
                total_pages: 3,
                total_rows: 25,
                first_row: 11,
                last_row: 20,
            }
        );
        assert!(info.has_previous());
        assert!(info.has_next());

        let empty = p.info(0);
        assert_eq!(empty.first_row, 0);
        assert_eq!(empty.last_row, 0);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
    }
}
