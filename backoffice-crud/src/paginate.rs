//! Fixed-size pagination over a slice.

/// One page of a sequence. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; 0 for an empty sequence.
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// 1-based index of the first item on this page, 0 when the page is empty.
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn last_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_item() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Brings `page` into `[1, total_pages]` (1 when there are no pages).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slices page `page` of `items`.
///
/// Does not clamp: a page past the end (or page 0) yields no items. Callers
/// keep the page number in range with [`clamp_page`].
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);
    let slice = if page == 0 || page_size == 0 {
        &items[..0]
    } else {
        let start = (page - 1).saturating_mul(page_size).min(items.len());
        let end = start.saturating_add(page_size).min(items.len());
        &items[start..end]
    };
    Page {
        items: slice,
        page,
        page_size,
        total_items: items.len(),
        total_pages: total,
    }
}
