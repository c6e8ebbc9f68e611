//! Pagination over filtered listings.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number. `0` is treated as `1`.
    pub page: u32,
    /// Items per page. `0` means the store's configured default.
    pub page_size: u32,
}

impl PageRequest {
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Replace zero fields with usable values.
    #[must_use]
    pub const fn normalized(self, default_page_size: u32) -> Self {
        Self {
            page: if self.page == 0 { 1 } else { self.page },
            page_size: if self.page_size == 0 {
                default_page_size
            } else {
                self.page_size
            },
        }
    }

    fn offset(self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the filtered set before slicing.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Slice an already-filtered set.
    pub(crate) fn slice<I>(filtered: I, request: PageRequest) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut total = 0;
        let mut items = Vec::new();
        let start = request.offset();
        let end = start.saturating_add(request.page_size as usize);
        for item in filtered {
            if (start..end).contains(&total) {
                items.push(item);
            }
            total += 1;
        }
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Convert the page items, keeping the counts.
    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Number of pages needed for `total` items.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_fills_zeroes() {
        let request = PageRequest::new(0, 0).normalized(10);
        assert_eq!(request, PageRequest::new(1, 10));
        assert_eq!(PageRequest::new(3, 5).normalized(10), PageRequest::new(3, 5));
    }

    #[test]
    fn test_slice_counts_whole_set() {
        let page = Page::slice(1..=23, PageRequest::new(3, 10));
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let page = Page::slice(1..=5, PageRequest::new(4, 2));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_map_touches_only_page_items() {
        let data: Vec<String> = (1..=40).map(|n| n.to_string()).collect();
        let mut converted = 0;
        let page = Page::slice(data.iter(), PageRequest::new(2, 5)).map(|s| {
            converted += 1;
            s.clone()
        });
        assert_eq!(converted, 5);
        assert_eq!(page.items, vec!["6", "7", "8", "9", "10"]);
        assert_eq!(page.total, 40);
        assert_eq!(page.total_pages(), 8);
    }

    #[test]
    fn test_consecutive_pages_are_disjoint_and_contiguous() {
        let data: Vec<u32> = (1..=15).collect();
        let first = Page::slice(data.clone(), PageRequest::new(1, 10));
        let second = Page::slice(data.clone(), PageRequest::new(2, 10));
        let mut joined = first.items;
        joined.extend(second.items);
        assert_eq!(joined, data);
    }
}
