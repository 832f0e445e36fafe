use serde::{Deserialize, Serialize};

/// A 1-indexed page request. Bounds are checked at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: usize = 10;
    pub const MAX_PAGE_SIZE: usize = 100;

    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of records after filtering, before slicing.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice an already filtered and sorted result set.
    ///
    /// Pages past the end come back empty with the real totals.
    pub fn paginate(records: Vec<T>, request: PageRequest) -> Self {
        let total = records.len();
        let total_pages = if request.page_size == 0 {
            0
        } else {
            total.div_ceil(request.page_size)
        };

        let items = records
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .collect();

        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages,
        }
    }
}
