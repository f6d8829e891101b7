//! Page-strip computation: which page numbers and ellipses to show

/// Pages shown on each side of the current page unless configured otherwise
pub const DEFAULT_SIBLING_COUNT: u32 = 1;

/// One slot of the page strip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRangeItem {
    Page(u32),
    Ellipsis,
}

/// Pages kept next to an edge when only the opposite side is elided
fn edge_run_len(sibling_count: u32) -> u32 {
    sibling_count.saturating_mul(2).saturating_add(2)
}

fn pages(start: u32, end: u32) -> impl Iterator<Item = PageRangeItem> {
    (start..=end).map(PageRangeItem::Page)
}

/// Compute the page strip for `total_pages`, centred on `current_page`.
///
/// The first and last page are always shown, plus `sibling_count` pages on
/// each side of the current one; elided runs collapse into an ellipsis.
/// `current_page` is expected in `1..=total_pages` and is not clamped here.
/// A zero `total_pages` yields an empty strip.
pub fn page_range(total_pages: u32, current_page: u32, sibling_count: u32) -> Vec<PageRangeItem> {
    // first + last + current + two ellipses, plus the siblings
    let total_slots = sibling_count.saturating_add(5);

    if total_slots >= total_pages {
        return pages(1, total_pages).collect();
    }

    let left_sibling = current_page.saturating_sub(sibling_count).max(1);
    let right_sibling = current_page.saturating_add(sibling_count).min(total_pages);

    let show_left_ellipsis = left_sibling > 2;
    let show_right_ellipsis = right_sibling < total_pages.saturating_sub(2);

    let edge_run = edge_run_len(sibling_count);

    let strip: Vec<PageRangeItem> = match (show_left_ellipsis, show_right_ellipsis) {
        (false, true) => pages(1, edge_run.max(right_sibling).min(total_pages - 1))
            .chain([PageRangeItem::Ellipsis, PageRangeItem::Page(total_pages)])
            .collect(),
        (true, false) => {
            let start = (total_pages.saturating_sub(edge_run) + 1)
                .max(2)
                .min(left_sibling);
            [PageRangeItem::Page(1), PageRangeItem::Ellipsis]
                .into_iter()
                .chain(pages(start, total_pages))
                .collect()
        }
        (true, true) => [PageRangeItem::Page(1), PageRangeItem::Ellipsis]
            .into_iter()
            .chain(pages(left_sibling, right_sibling))
            .chain([PageRangeItem::Ellipsis, PageRangeItem::Page(total_pages)])
            .collect(),
        // Unreachable once the dense short-circuit above fails; kept total.
        (false, false) => pages(1, total_pages).collect(),
    };

    drop_empty_ellipses(strip)
}

/// An ellipsis between two consecutive page numbers elides nothing.
fn drop_empty_ellipses(strip: Vec<PageRangeItem>) -> Vec<PageRangeItem> {
    let mut out = Vec::with_capacity(strip.len());
    for (i, item) in strip.iter().enumerate() {
        if let PageRangeItem::Ellipsis = item {
            if let (Some(PageRangeItem::Page(before)), Some(PageRangeItem::Page(after))) =
                (i.checked_sub(1).and_then(|j| strip.get(j)), strip.get(i + 1))
            {
                if after.saturating_sub(*before) <= 1 {
                    continue;
                }
            }
        }
        out.push(*item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use PageRangeItem::{Ellipsis, Page};

    #[test]
    fn test_only_right_ellipsis_on_first_page() {
        assert_eq!(
            page_range(10, 1, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_only_left_ellipsis_on_last_page() {
        assert_eq!(
            page_range(10, 10, 1),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_both_ellipses_in_the_middle() {
        assert_eq!(
            page_range(10, 5, 1),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_zero_pages_is_empty() {
        assert!(page_range(0, 1, 1).is_empty());
    }

    #[test]
    fn test_small_totals_are_dense() {
        assert_eq!(page_range(1, 1, 1), vec![Page(1)]);
        assert_eq!(
            page_range(6, 3, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn test_zero_siblings() {
        assert_eq!(
            page_range(10, 5, 0),
            vec![Page(1), Ellipsis, Page(5), Ellipsis, Page(10)]
        );
        // Left-only run still reaches back to the current page
        assert_eq!(
            page_range(10, 8, 0),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_wider_sibling_count() {
        assert_eq!(
            page_range(20, 10, 2),
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn test_ellipsis_that_hides_nothing_is_dropped() {
        // Edge run of 8 pages reaches the page before the last one
        let strip = page_range(9, 1, 3);
        assert_eq!(strip, (1..=9).map(Page).collect::<Vec<_>>());
    }

    #[test]
    fn test_edge_run_saturates_for_huge_sibling_counts() {
        assert_eq!(edge_run_len(1), 4);
        assert_eq!(edge_run_len(1 << 31), u32::MAX);
        assert_eq!(edge_run_len(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_huge_sibling_count_on_a_short_range_is_dense() {
        assert_eq!(page_range(7, 4, u32::MAX), (1..=7).map(Page).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_dense_when_slots_cover_all_pages(sibling in 0u32..6, extra in 0u32..6) {
            let total = (sibling + 5).saturating_sub(extra);
            let current = total.max(1);
            let range = page_range(total, current, sibling);
            let expected: Vec<PageRangeItem> = (1..=total).map(Page).collect();
            prop_assert_eq!(range, expected);
        }

        #[test]
        fn prop_any_sibling_count_keeps_anchors(total in 1u32..300, sibling in any::<u32>(), seed in 0u32..300) {
            let current = seed % total + 1;
            let range = page_range(total, current, sibling);
            prop_assert_eq!(range.first(), Some(&Page(1)));
            prop_assert_eq!(range.last(), Some(&Page(total)));
            prop_assert!(range.contains(&Page(current)));
        }

        #[test]
        fn prop_strip_is_well_formed(total in 1u32..200, sibling in 0u32..4, seed in 0u32..200) {
            let current = seed % total + 1;
            let range = page_range(total, current, sibling);

            // Anchored on the first and last page, and the current one is visible
            prop_assert_eq!(range.first(), Some(&Page(1)));
            prop_assert_eq!(range.last(), Some(&Page(total)));
            prop_assert!(range.contains(&Page(current)));

            // Neighbours of the current page are visible
            for n in current.saturating_sub(sibling).max(1)..=(current + sibling).min(total) {
                prop_assert!(range.contains(&Page(n)));
            }

            let numbers: Vec<u32> = range
                .iter()
                .filter_map(|item| match item {
                    Page(n) => Some(*n),
                    Ellipsis => None,
                })
                .collect();
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));

            // Every ellipsis stands for at least one hidden page
            for w in range.windows(3) {
                if let [Page(a), Ellipsis, Page(b)] = w {
                    prop_assert!(b - a >= 2);
                }
            }

            if total > sibling + 5 {
                prop_assert!(range.len() as u32 <= 2 * sibling + 5);
            }
        }
    }
}
