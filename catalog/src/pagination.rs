use crate::model::DetailRecord;
use crate::model::EntityId;
use std::sync::Arc;

/// Number of pages for `len` items; never less than one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// A borrowed page of an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    pub page_number: usize,
    pub total_pages: usize,
}

/// Slice `items` into fixed-size pages and return page `page_number`,
/// clamped into `[1, total_pages]`.
pub fn paginate<T>(items: &[T], page_number: usize, page_size: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page_number = page_number.clamp(1, total_pages);
    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    PageSlice {
        items: &items[start.min(end)..end],
        page_number,
        total_pages,
    }
}

/// Current page position. Navigation never leaves `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_number: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_number: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn first(self) -> Self {
        Self {
            page_number: 1,
            ..self
        }
    }

    pub fn total_pages(self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    pub fn has_prev(self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(self, len: usize) -> bool {
        self.page_number < self.total_pages(len)
    }

    pub fn prev(self) -> Self {
        Self {
            page_number: self.page_number.saturating_sub(1).max(1),
            ..self
        }
    }

    pub fn next(self, len: usize) -> Self {
        Self {
            page_number: (self.page_number + 1).min(self.total_pages(len)),
            ..self
        }
    }
}

/// A resolved page handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Detail records of the slice, in slice order; ids that failed to load
    /// are omitted.
    pub records: Vec<Arc<DetailRecord>>,
    /// Ids in the slice without a detail record.
    pub missing: Vec<EntityId>,
    /// Number of entities in the slice before detail resolution.
    pub slice_len: usize,
    pub page_number: usize,
    pub total_pages: usize,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.slice_len == 0
    }

    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}
