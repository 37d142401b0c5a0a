//! Client-side paging of already fetched lists.
//!
//! Pages are 0-indexed, matching `PaginationControls` in the frontend.

/// Number of pages needed for `len` items. Empty input has 0 pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items of page `page`, at most `page_size` long. Out-of-range pages are empty.
pub fn paginate<T>(data: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_mul(page_size).min(data.len());
    let end = start.saturating_add(page_size).min(data.len());
    &data[start..end]
}

/// Clamp a page index into `[0, pages)` after the underlying list changed.
pub fn clamp_page(page: usize, pages: usize) -> usize {
    if pages == 0 {
        0
    } else {
        page.min(pages - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(total_pages(11, 0), 0);
    }

    #[test]
    fn test_pages_reconstruct_input() {
        for len in 0..23usize {
            let data: Vec<usize> = (0..len).collect();
            for page_size in 1..7usize {
                let pages = total_pages(len, page_size);
                let mut rebuilt = Vec::new();
                for page in 0..pages {
                    let chunk = paginate(&data, page, page_size);
                    assert!(chunk.len() <= page_size);
                    assert!(!chunk.is_empty());
                    rebuilt.extend_from_slice(chunk);
                }
                assert_eq!(rebuilt, data, "len={} page_size={}", len, page_size);
            }
        }
    }

    #[test]
    fn test_out_of_range_page() {
        let data = [1, 2, 3];
        assert!(paginate(&data, 4, 2).is_empty());
        assert!(paginate(&data, usize::MAX, 2).is_empty());
        assert!(paginate(&data, 0, 0).is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(3, 0), 0);
        assert_eq!(clamp_page(3, 2), 1);
        assert_eq!(clamp_page(1, 2), 1);
    }
}
