//! Page-number pagination that never fails.
//!
//! Out-of-range page numbers clamp to the first or last page, and an empty
//! sequence always yields a single empty page numbered 1.

use serde::Serialize;

/// A contiguous slice of an ordered result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items in this page
    pub items: Vec<T>,
    /// Current page number (1-indexed)
    pub number: usize,
    /// Total number of pages, at least 1
    pub num_pages: usize,
    /// Total number of items across all pages
    pub count: usize,
    /// Items per page
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 when empty
    pub fn start_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last item on this page, 0 when empty
    pub fn end_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start_index() + self.items.len() - 1
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            page_size: self.page_size,
        }
    }
}

/// Number of pages needed for `count` items; 0 items still make one page
pub fn page_count(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

/// Slice `items` into the requested page.
///
/// `page_size` of 0 is treated as 1. `page_number` below 1 yields page 1 and
/// beyond the last page yields the last page.
///
/// # Example
/// ```
/// use mesa_catalog::pagination::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let page = paginate(items, 12, 4);
/// assert_eq!(page.number, 3);
/// assert_eq!(page.items, vec![25]);
/// ```
pub fn paginate<T>(items: Vec<T>, page_size: usize, page_number: i64) -> Page<T> {
    let page_size = page_size.max(1);
    let count = items.len();
    let num_pages = page_count(count, page_size);

    let number = if page_number < 1 {
        1
    } else {
        usize::try_from(page_number).map_or(num_pages, |n| n.min(num_pages))
    };

    let start = (number - 1) * page_size;
    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        number,
        num_pages,
        count,
        page_size,
    }
}

/// Interpret a raw `page` query value. Missing or non-numeric values mean
/// page 1; numeric values are passed through for clamping.
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(1)
}
