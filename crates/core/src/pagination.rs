//! Fixed-size, 1-indexed page windows
//!
//! Pure functions that slice an ordered sequence into pages and describe the
//! result for navigation. Out-of-range pages produce an empty page rather
//! than an error; callers keep the current page in range through navigation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page sizes a listing can be switched to
pub const ALLOWED_PAGE_SIZES: [usize; 3] = [5, 10, 20];

/// Number of items per page, restricted to [`ALLOWED_PAGE_SIZES`]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

/// Error type for page size selection
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageSizeError {
    #[error("Invalid page size: {0}. Valid sizes: 5, 10, 20")]
    NotAllowed(usize),

    #[error("Page size must be a number, got: {0}")]
    NotANumber(String),
}

impl PageSize {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(ALLOWED_PAGE_SIZES[0])
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if ALLOWED_PAGE_SIZES.contains(&value) {
            Ok(PageSize(value))
        } else {
            Err(PageSizeError::NotAllowed(value))
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl FromStr for PageSize {
    type Err = PageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<usize>()
            .map_err(|_| PageSizeError::NotANumber(s.to_string()))?;
        PageSize::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pagination metadata handed to the view
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current_page, self.total_pages)
    }
}

/// Number of pages needed for `total_items`, never less than 1
///
/// An empty listing still reports a single page so the view never shows
/// "page 0 of 0". A zero page size is treated the same way.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Calculate slice bounds for a given page
///
/// Returns (start_index, end_index) for slicing the items array, or `None`
/// when the page is 0, starts past the end of the items, or the page size
/// is 0.
pub fn page_bounds(total_items: usize, page: usize, page_size: usize) -> Option<(usize, usize)> {
    if page == 0 || page_size == 0 {
        return None;
    }

    let start = (page - 1).checked_mul(page_size)?;

    if start >= total_items {
        return None;
    }

    let end = start.saturating_add(page_size).min(total_items);
    Some((start, end))
}

/// Build the metadata for `page` over `total_items`
pub fn page_info(total_items: usize, page: usize, page_size: usize) -> PageInfo {
    let total_pages = total_pages(total_items, page_size);

    PageInfo {
        current_page: page,
        total_pages,
        total_items,
        page_size,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

/// Slice `items` to the requested page and describe it
///
/// The returned vector is empty when `items` is empty or `page` is out of
/// range.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, PageInfo) {
    let page_items = match page_bounds(items.len(), page, page_size) {
        Some((start, end)) => items[start..end].to_vec(),
        None => Vec::new(),
    };

    (page_items, page_info(items.len(), page, page_size))
}
