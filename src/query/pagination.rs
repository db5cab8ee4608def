//! Pagination over an ordered collection

use serde::Serialize;

use crate::config::PageOverflow;

/// Page size used when the caller asks for a non-positive one
pub const DEFAULT_PER_PAGE: usize = 10;

/// Where a page sits within a paginated collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based page being shown
    pub current_page: usize,
    /// Always at least 1, even for an empty collection
    pub total_pages: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: usize,
    pub next_page: usize,
    /// Zero-based index of the first item of the page
    pub offset: usize,
}

impl Pagination {
    /// Compute the descriptor with an explicit policy for pages past the end
    pub fn with_overflow(
        total_items: usize,
        page: i64,
        per_page: i64,
        overflow: PageOverflow,
    ) -> Self {
        let per_page = usize::try_from(per_page)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_PER_PAGE);
        let requested = usize::try_from(page).ok().filter(|&n| n > 0).unwrap_or(1);
        let total_pages = total_items.div_ceil(per_page).max(1);

        let (current_page, offset) = if requested <= total_pages {
            (requested, (requested - 1) * per_page)
        } else {
            match overflow {
                PageOverflow::Clamp => (total_pages, (total_pages - 1) * per_page),
                PageOverflow::Empty => (requested, total_items),
            }
        };

        let has_prev = current_page > 1;
        let has_next = current_page < total_pages;

        Self {
            current_page,
            total_pages,
            per_page,
            total_items,
            has_prev,
            has_next,
            prev_page: if has_prev {
                (current_page - 1).min(total_pages)
            } else {
                1
            },
            next_page: if has_next { current_page + 1 } else { total_pages },
            offset,
        }
    }

    /// Index range of the page within the collection
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset.min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        if self.current_page > self.total_pages {
            start..start
        } else {
            start..end
        }
    }
}

/// One page of items together with its descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub pagination: Pagination,
}

/// Slice out a page. `page <= 0` means page 1, `per_page <= 0` means
/// [`DEFAULT_PER_PAGE`], and a page past the end yields the last page.
pub fn paginate<T>(items: &[T], page: i64, per_page: i64) -> Page<'_, T> {
    paginate_with(items, page, per_page, PageOverflow::Clamp)
}

/// Like [`paginate`], with an explicit policy for pages past the end
pub fn paginate_with<T>(
    items: &[T],
    page: i64,
    per_page: i64,
    overflow: PageOverflow,
) -> Page<'_, T> {
    let pagination = Pagination::with_overflow(items.len(), page, per_page, overflow);
    Page {
        items: &items[pagination.range()],
        pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let items: Vec<usize> = (1..=25).collect();
        let page = paginate(&items, 2, 10);
        assert_eq!(page.items, &items[10..20]);
        assert_eq!(page.items.first(), Some(&11));
        assert_eq!(page.items.last(), Some(&20));
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_prev);
        assert!(page.pagination.has_next);
        assert_eq!(page.pagination.prev_page, 1);
        assert_eq!(page.pagination.next_page, 3);
        assert_eq!(page.pagination.offset, 10);
    }

    #[test]
    fn test_last_partial_page() {
        let items: Vec<usize> = (1..=25).collect();
        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &items[20..25]);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_defaults_for_non_positive_arguments() {
        let items: Vec<usize> = (1..=15).collect();
        let page = paginate(&items, 0, 0);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.per_page, DEFAULT_PER_PAGE);
        assert_eq!(page.items.len(), 10);

        let page = paginate(&items, -4, -1);
        assert_eq!(page.pagination.current_page, 1);
        assert!(!page.pagination.has_prev);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.current_page, 1);
        assert!(!page.pagination.has_prev);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let items = vec!["a", "b", "c"];
        let far = paginate(&items, 9999, 10);
        let last = paginate(&items, far.pagination.total_pages as i64, 10);
        assert_eq!(far, last);
        assert_eq!(far.items, &["a", "b", "c"]);
    }

    #[test]
    fn test_out_of_range_can_be_empty() {
        let items: Vec<usize> = (1..=25).collect();
        let page = paginate_with(&items, 7, 10, PageOverflow::Empty);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.current_page, 7);
        assert!(page.pagination.has_prev);
        assert!(!page.pagination.has_next);
        assert_eq!(page.pagination.prev_page, 3);
    }

    #[test]
    fn test_pages_cover_collection_exactly() {
        let items: Vec<usize> = (0..47).collect();
        for per_page in 1..=50 {
            let total_pages = paginate(&items, 1, per_page).pagination.total_pages;
            let joined: Vec<usize> = (1..=total_pages as i64)
                .flat_map(|p| paginate(&items, p, per_page).items.to_vec())
                .collect();
            assert_eq!(joined, items, "per_page = {}", per_page);
        }
    }
}
