//! Page-window arithmetic over a filtered or unfiltered item list.

use serde::Serialize;

/// Fixed number of items per page.
pub const PAGE_SIZE: usize = 10;

/// Page metadata returned alongside every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_pages: u64,
    pub current_page: u64,
    pub next_page: u64,
    pub prev_page: u64,
}

/// Compute the window for `page` plus its metadata.
///
/// Pages are 1-based; values `<= 0` clamp to page 1. A page beyond
/// `total_pages` yields an empty window with well-formed metadata.
pub fn paginate<T: Clone>(items: &[T], page: i64) -> (Vec<T>, PageMeta) {
    let current = if page < 1 { 1 } else { page as u64 };
    let total_pages = (items.len() as u64).div_ceil(PAGE_SIZE as u64);

    // Checked arithmetic: a page number large enough to overflow the
    // offset is just another out-of-range page, not a panic.
    let window = match (current as usize)
        .checked_sub(1)
        .and_then(|p| p.checked_mul(PAGE_SIZE))
    {
        Some(start) if start < items.len() => {
            items[start..(start + PAGE_SIZE).min(items.len())].to_vec()
        }
        _ => Vec::new(),
    };

    let meta = PageMeta {
        total_pages,
        current_page: current,
        next_page: (current + 1).min(total_pages),
        prev_page: (current - 1).max(1),
    };
    (window, meta)
}
