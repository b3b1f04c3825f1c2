//! Pagination arithmetic

/// Number of pages needed for `count` items (0 when empty)
///
/// # Examples
/// ```
/// use keytui::logic::paging::total_pages;
///
/// assert_eq!(total_pages(0, 50), 0);
/// assert_eq!(total_pages(50, 50), 1);
/// assert_eq!(total_pages(51, 50), 2);
/// ```
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamp a page index into `[0, max(0, total_pages - 1)]`
pub fn clamp_page(page_index: usize, count: usize, page_size: usize) -> usize {
    let last = total_pages(count, page_size).saturating_sub(1);
    page_index.min(last)
}

/// Range of item positions shown on a page
pub fn page_bounds(page_index: usize, count: usize, page_size: usize) -> std::ops::Range<usize> {
    let start = page_index.saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// Page that keeps the first item of the old page visible after a resize
pub fn page_after_resize(page_index: usize, old_size: usize, new_size: usize, count: usize) -> usize {
    if new_size == 0 {
        return 0;
    }
    let first_item = page_index.saturating_mul(old_size);
    clamp_page(first_item / new_size, count, new_size)
}
