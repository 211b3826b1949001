//! Fixed-size paging over the in-memory reviews.

pub const REVIEWS_PER_PAGE: usize = 5;

/// Items on zero-based `page`; shorter on the last page, empty past the end.
pub fn page_items<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

pub fn has_next(page: usize, len: usize, per_page: usize) -> bool {
    page.saturating_add(1).saturating_mul(per_page) < len
}

pub fn has_prev(page: usize) -> bool {
    page > 0
}

pub fn controls_visible(len: usize, per_page: usize) -> bool {
    page_count(len, per_page) > 1
}

/// Last valid page for `len` items (0 when there are none).
pub fn clamp_page(page: usize, len: usize, per_page: usize) -> usize {
    page.min(page_count(len, per_page).saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_reviews_split_into_three_pages() {
        let reviews: Vec<u32> = (1..=12).collect();

        assert_eq!(page_count(reviews.len(), REVIEWS_PER_PAGE), 3);
        assert_eq!(page_items(&reviews, 0, REVIEWS_PER_PAGE), &[1, 2, 3, 4, 5]);
        assert_eq!(page_items(&reviews, 1, REVIEWS_PER_PAGE), &[6, 7, 8, 9, 10]);
        assert_eq!(page_items(&reviews, 2, REVIEWS_PER_PAGE), &[11, 12]);
        assert!(page_items(&reviews, 3, REVIEWS_PER_PAGE).is_empty());
    }

    #[test]
    fn test_page_count_is_ceiling() {
        for len in 0..40 {
            let expected = (len + REVIEWS_PER_PAGE - 1) / REVIEWS_PER_PAGE;
            assert_eq!(page_count(len, REVIEWS_PER_PAGE), expected, "len {}", len);
        }
    }

    #[test]
    fn test_next_is_blocked_only_on_last_page() {
        for len in 1..30 {
            let last = page_count(len, REVIEWS_PER_PAGE) - 1;
            for page in 0..=last {
                assert_eq!(has_next(page, len, REVIEWS_PER_PAGE), page != last);
            }
        }
        assert!(!has_next(0, 0, REVIEWS_PER_PAGE));
        assert!(!has_prev(0));
        assert!(has_prev(1));
    }

    #[test]
    fn test_controls_hidden_for_single_page() {
        assert!(!controls_visible(0, REVIEWS_PER_PAGE));
        assert!(!controls_visible(5, REVIEWS_PER_PAGE));
        assert!(controls_visible(6, REVIEWS_PER_PAGE));
    }

    #[test]
    fn test_clamp_after_shrink() {
        assert_eq!(clamp_page(2, 12, REVIEWS_PER_PAGE), 2);
        assert_eq!(clamp_page(2, 7, REVIEWS_PER_PAGE), 1);
        assert_eq!(clamp_page(3, 0, REVIEWS_PER_PAGE), 0);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(page_items(&items, usize::MAX, REVIEWS_PER_PAGE).is_empty());
        assert!(!has_next(usize::MAX, 3, REVIEWS_PER_PAGE));
    }
}
