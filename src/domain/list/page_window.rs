use crate::domain::entities::listing::PageWindowEntry;

/// Page buttons to render: first, last and current ± 1, with runs of two or
/// more hidden pages collapsed into one ellipsis.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<PageWindowEntry> {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);

    let mut kept = vec![1, current.saturating_sub(1), current, current + 1, total];
    kept.retain(|page| (1..=total).contains(page));
    kept.sort_unstable();
    kept.dedup();

    let mut window = Vec::with_capacity(kept.len() + 2);
    let mut previous: Option<usize> = None;
    for page in kept {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                2 => window.push(PageWindowEntry::Page(prev + 1)),
                _ => window.push(PageWindowEntry::Ellipsis),
            }
        }
        window.push(PageWindowEntry::Page(page));
        previous = Some(page);
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageWindowEntry::{Ellipsis, Page};

    #[test]
    fn first_page_of_ten() {
        assert_eq!(page_window(10, 1), vec![Page(1), Page(2), Ellipsis, Page(10)]);
    }

    #[test]
    fn middle_page_of_ten() {
        assert_eq!(
            page_window(10, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn three_pages_never_collapse() {
        assert_eq!(page_window(3, 2), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn single_page() {
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(0, 0), vec![Page(1)]);
    }

    #[test]
    fn single_hidden_page_is_shown() {
        assert_eq!(
            page_window(10, 4),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(10, 7),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_window(5, 99), vec![Page(1), Ellipsis, Page(4), Page(5)]);
    }

    #[test]
    fn window_is_strictly_increasing_without_adjacent_ellipses() {
        for total in 1..=30 {
            for current in 1..=total {
                let window = page_window(total, current);
                let pages: Vec<usize> = window
                    .iter()
                    .filter_map(|entry| match entry {
                        Page(page) => Some(*page),
                        Ellipsis => None,
                    })
                    .collect();
                assert!(pages.windows(2).all(|w| w[0] < w[1]), "{total}/{current}");
                assert_eq!(pages.first(), Some(&1));
                assert_eq!(pages.last(), Some(&total));
                assert!(pages.contains(&current));
                assert!(!window
                    .windows(2)
                    .any(|w| w[0] == Ellipsis && w[1] == Ellipsis));
                assert_ne!(window.first(), Some(&Ellipsis));
                assert_ne!(window.last(), Some(&Ellipsis));
            }
        }
    }
}
