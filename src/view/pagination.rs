use std::ops::Range;

pub const RESULTS_PER_PAGE: usize = 10;

/// Offset-based paging over an in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    results_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(RESULTS_PER_PAGE)
    }
}

impl PageState {
    pub fn new(results_per_page: usize) -> PageState {
        PageState {
            current_page: 1,
            results_per_page: results_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn results_per_page(&self) -> usize {
        self.results_per_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.results_per_page)
    }

    /// Index range of the visible slice; never exceeds `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.results_per_page).min(len);
        let end = (start + self.results_per_page).min(len);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current_page < self.total_pages(len)
    }

    /// Returns whether the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if !self.has_next(len) {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let page = PageState::default();
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
        assert_eq!(page.total_pages(95), 10);
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut page = PageState::default();
        assert!(!page.previous());
        assert_eq!(page.current_page(), 1);

        assert!(page.next(25));
        assert!(page.next(25));
        assert_eq!(page.current_page(), 3);
        assert!(!page.next(25), "next on the last page does nothing");
        assert_eq!(page.current_page(), 3);
        assert_eq!(page.range(25), 20..25);
    }

    #[test]
    fn test_range() {
        let mut page = PageState::default();
        assert_eq!(page.range(0), 0..0);
        assert_eq!(page.range(4), 0..4);
        page.next(30);
        assert_eq!(page.range(30), 10..20);
    }
}
