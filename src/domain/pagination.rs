//! Page slicing and page-number windows.
//!
//! Pagination is order-agnostic: it slices whatever sequence it is given.
//! Callers sort first (see [`super::lead::sort_newest_first`]).

use serde::Serialize;
use utoipa::ToSchema;

/// Maximum number of page buttons shown at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Number of pages needed for `total` items. Zero items or a zero page
/// size give zero pages.
#[must_use]
pub const fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Items on the 1-based `page`, clamped to the bounds of `items`.
///
/// Page 0 and pages past the end give an empty slice.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Up to [`MAX_VISIBLE_PAGES`] consecutive page numbers around `current`.
///
/// The window is shifted rather than truncated at either end, so it
/// always has `min(5, total_pages)` entries. An out-of-range `current` is
/// clamped into `[1, total_pages]` first.
#[must_use]
pub fn visible_pages(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let width = MAX_VISIBLE_PAGES.min(total_pages);
    let current = current.clamp(1, total_pages);
    let half = MAX_VISIBLE_PAGES / 2;
    let first = current
        .saturating_sub(half)
        .max(1)
        .min(total_pages + 1 - width);
    (first..first + width).collect()
}

/// Pagination metadata returned next to a page slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageInfo {
    /// Requested 1-based page.
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Items across all pages.
    pub total_items: usize,
    /// `ceil(total_items / page_size)`.
    pub total_pages: usize,
    /// Page numbers to render as buttons.
    pub visible_page_numbers: Vec<usize>,
}

impl PageInfo {
    /// Computes metadata for `total_items` items.
    #[must_use]
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = total_pages(total_items, page_size);
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            visible_page_numbers: visible_pages(page, total_pages),
        }
    }
}

/// Slices `items` and computes the matching [`PageInfo`] in one go.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, PageInfo) {
    (
        page_slice(items, page, page_size).to_vec(),
        PageInfo::new(page, page_size, items.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn pages_reconstruct_sequence() {
        for n in 0..40_usize {
            let items: Vec<usize> = (0..n).collect();
            for size in 1..8 {
                let pages = total_pages(n, size);
                let rebuilt: Vec<usize> = (1..=pages)
                    .flat_map(|p| page_slice(&items, p, size).iter().copied())
                    .collect();
                assert_eq!(rebuilt, items, "n={n} size={size}");
            }
        }
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items = [1, 2, 3];
        assert!(page_slice(&items, 0, 2).is_empty());
        assert!(page_slice(&items, 3, 2).is_empty());
        assert!(page_slice(&items, usize::MAX, 2).is_empty());
        assert!(page_slice(&items, 1, 0).is_empty());
    }

    #[test]
    fn last_page_is_partial() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(page_slice(&items, 3, 2), &[5]);
    }

    #[test]
    fn window_is_centered_in_the_middle() {
        assert_eq!(visible_pages(6, 10), [4, 5, 6, 7, 8]);
    }

    #[test]
    fn window_shifts_at_edges() {
        assert_eq!(visible_pages(1, 10), [1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(2, 10), [1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(10, 10), [6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(9, 10), [6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_length_and_membership() {
        for total in 0..12 {
            for current in 1..=total {
                let window = visible_pages(current, total);
                assert_eq!(window.len(), MAX_VISIBLE_PAGES.min(total));
                assert!(window.contains(&current));
                assert!(window.iter().all(|p| (1..=total).contains(p)));
            }
        }
    }

    #[test]
    fn window_with_no_pages_is_empty() {
        assert!(visible_pages(1, 0).is_empty());
    }

    #[test]
    fn window_clamps_out_of_range_current() {
        assert_eq!(visible_pages(0, 3), [1, 2, 3]);
        assert_eq!(visible_pages(99, 7), [3, 4, 5, 6, 7]);
    }

    #[test]
    fn paginate_reports_metadata() {
        let items: Vec<u32> = (0..45).collect();
        let (slice, info) = paginate(&items, 3, 20);
        assert_eq!(slice, (40..45).collect::<Vec<_>>());
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total_items, 45);
        assert_eq!(info.visible_page_numbers, [1, 2, 3]);
    }
}
