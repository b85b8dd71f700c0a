//! Fixed-size page windows over a sequence.

use incident_map_analytics_models::{Page, page_count};

/// Returns the items on 1-based page `page_index`.
///
/// Out-of-range indices (including `0`) and a zero `page_size` yield an
/// empty page rather than panicking.
#[must_use]
pub fn page_slice<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    if page_index == 0 || page_size == 0 {
        return &[];
    }
    let Some(start) = (page_index - 1).checked_mul(page_size) else {
        return &[];
    };
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// Windows `items` into pages of `page_size` and returns page `page_index`
/// together with the total page count.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page_index: usize, page_size: usize) -> Page<T> {
    Page {
        items: page_slice(items, page_index, page_size).to_vec(),
        page_count: page_count(items.len(), page_size),
    }
}
