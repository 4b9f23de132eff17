//! Page window arithmetic
//!
//! Pure functions for slicing a filtered result set into 1-indexed pages and
//! for computing the page-number strip shown by navigation controls.

use serde::Serialize;

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Maximum number of page links shown at once by [`page_numbers`]
pub const MAX_PAGES_SHOWN: usize = 5;

/// Error type for page window construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("Page numbers start at 1, got {0}")]
    ZeroPage(usize),
    #[error("Page size must be greater than zero")]
    ZeroLimit,
}

/// A (page, limit) pair. Both values are always >= 1, so there is no
/// `Deserialize` impl: every window goes through [`PageWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    page: usize,
    limit: usize,
}

impl PageWindow {
    pub fn new(page: usize, limit: usize) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage(page));
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// First page with the given limit
    pub fn first(limit: usize) -> Result<Self, PaginationError> {
        Self::new(1, limit)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Same limit, different page
    pub fn with_page(&self, page: usize) -> Result<Self, PaginationError> {
        Self::new(page, self.limit)
    }

    /// Slice bounds `(start, end)` into a result set of `total_items` records.
    ///
    /// Pages past the end produce an empty range rather than an error.
    pub fn bounds(&self, total_items: usize) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.limit).min(total_items);
        let end = start.saturating_add(self.limit).min(total_items);
        (start, end)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// `ceil(total_items / limit)`, zero when there are no items
pub fn total_pages(total_items: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total_items.div_ceil(limit)
}

/// Navigation metadata for a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub limit: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub page_numbers: Vec<usize>,
}

impl PaginationInfo {
    pub fn new(window: PageWindow, total_count: usize) -> Self {
        let pages = total_pages(total_count, window.limit());
        Self {
            current_page: window.page(),
            total_pages: pages,
            total_count,
            limit: window.limit(),
            has_prev: window.page() > 1,
            has_next: window.page() < pages,
            page_numbers: page_numbers(window.page(), pages),
        }
    }
}

/// Contiguous strip of at most [`MAX_PAGES_SHOWN`] page numbers around `current`.
///
/// The strip is shifted so it never leaves `1..=total_pages`.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= MAX_PAGES_SHOWN {
        return (1..=total_pages).collect();
    }

    let before = MAX_PAGES_SHOWN / 2;
    let after = MAX_PAGES_SHOWN.div_ceil(2) - 1;

    let (start, end) = if current <= before {
        (1, MAX_PAGES_SHOWN)
    } else if current.saturating_add(after) >= total_pages {
        (total_pages - MAX_PAGES_SHOWN + 1, total_pages)
    } else {
        (current - before, current + after)
    };

    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rejects_zero_page() {
        assert_eq!(PageWindow::new(0, 9), Err(PaginationError::ZeroPage(0)));
    }

    #[test]
    fn test_window_rejects_zero_limit() {
        assert_eq!(PageWindow::new(1, 0), Err(PaginationError::ZeroLimit));
    }

    #[test]
    fn test_bounds_first_page() {
        let window = PageWindow::new(1, 9).unwrap();
        assert_eq!(window.bounds(15), (0, 9));
    }

    #[test]
    fn test_bounds_last_page_partial() {
        let window = PageWindow::new(2, 9).unwrap();
        assert_eq!(window.bounds(15), (9, 15));
    }

    #[test]
    fn test_bounds_out_of_range_is_empty() {
        let window = PageWindow::new(5, 9).unwrap();
        assert_eq!(window.bounds(15), (15, 15));
    }

    #[test]
    fn test_bounds_empty_set() {
        let window = PageWindow::default();
        assert_eq!(window.bounds(0), (0, 0));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 9), 0);
        assert_eq!(total_pages(9, 9), 1);
        assert_eq!(total_pages(10, 9), 2);
        assert_eq!(total_pages(15, 9), 2);
    }

    #[test]
    fn test_page_numbers_few_pages() {
        assert_eq!(page_numbers(1, 3), vec![1, 2, 3]);
        assert_eq!(page_numbers(1, 0), Vec::<usize>::new());
    }

    #[test]
    fn test_page_numbers_near_start() {
        assert_eq!(page_numbers(2, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_numbers_middle() {
        assert_eq!(page_numbers(6, 10), vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_page_numbers_near_end() {
        assert_eq!(page_numbers(9, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_pagination_info_flags() {
        let info = PaginationInfo::new(PageWindow::new(2, 9).unwrap(), 15);
        assert_eq!(info.total_pages, 2);
        assert!(info.has_prev);
        assert!(!info.has_next);
        assert_eq!(info.page_numbers, vec![1, 2]);
    }

    #[test]
    fn test_page_numbers_past_the_end() {
        assert_eq!(page_numbers(usize::MAX, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_numbers(12, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_pagination_info_page_past_the_end() {
        let window = PageWindow::new(usize::MAX, 1).unwrap();
        assert_eq!(window.bounds(15), (15, 15));

        let info = PaginationInfo::new(window, 15);
        assert_eq!(info.total_pages, 15);
        assert!(info.has_prev);
        assert!(!info.has_next);
        assert_eq!(info.page_numbers, vec![11, 12, 13, 14, 15]);
    }
}
