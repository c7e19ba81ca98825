//! Pagination of a filtered, sorted list.
//!
//! [`paginate`] is a pure slice: it never corrects an out-of-range page, it
//! just returns no items. [`PageState`] is the caller's side of the
//! contract, holding the current page and pulling it back into range.

use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    /// Items on this page (at most `page_size`).
    pub items: Vec<R>,

    /// 1-indexed page number that was requested.
    pub page: usize,

    /// Fixed page size.
    pub page_size: usize,

    /// `max(1, ceil(total_items / page_size))`.
    pub total_pages: usize,

    /// Length of the list that was paginated.
    pub total_items: usize,
}

impl<R> Page<R> {
    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based inclusive positions of the first and last item on this page.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }
}

/// Number of pages for `len` items: never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Slice page `page` (1-indexed) out of `records`.
///
/// Page 0, a zero page size, or a page past the end yields no items.
///
/// ```rust
/// use vitrine_listing::paginate::paginate;
///
/// let items: Vec<u32> = (1..=7).collect();
/// let page = paginate(&items, 2, 6);
/// assert_eq!(page.items, vec![7]);
/// assert_eq!(page.total_pages, 2);
/// ```
pub fn paginate<R: Clone>(records: &[R], page: usize, page_size: usize) -> Page<R> {
    let total_items = records.len();
    let items = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
        .filter(|start| page_size > 0 && *start < total_items)
        .map(|start| {
            let end = start.saturating_add(page_size).min(total_items);
            records[start..end].to_vec()
        })
        .unwrap_or_default();

    Page {
        items,
        page,
        page_size,
        total_pages: total_pages(total_items, page_size),
        total_items,
    }
}

/// Outcome of a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// The page number did not change.
    Unchanged,
    /// The page changed; the view should scroll back to the top.
    ScrollToTop,
}

/// Current page and fixed page size of one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    current: usize,
    size: usize,
}

impl PageState {
    /// Start on page 1.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::config("page size must be at least 1"));
        }
        Ok(Self { current: 1, size })
    }

    /// Current 1-indexed page.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Fixed page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Go to a page. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: usize) -> PageChange {
        let page = page.max(1);
        if page == self.current {
            return PageChange::Unchanged;
        }
        self.current = page;
        PageChange::ScrollToTop
    }

    /// Back to page 1 (after a filter or sort change).
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Pull the current page into `1..=total_pages`. Returns `true` if it moved.
    pub fn clamp(&mut self, total_pages: usize) -> bool {
        let clamped = self.current.clamp(1, total_pages.max(1));
        let moved = clamped != self.current;
        self.current = clamped;
        moved
    }

    /// Slice `records` at the current page.
    pub fn apply<R: Clone>(&self, records: &[R]) -> Page<R> {
        paginate(records, self.current, self.size)
    }
}
