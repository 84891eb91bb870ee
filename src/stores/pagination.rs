//! Pagination store - page arithmetic and transition validation for browse mode

use crate::models::Artist;

/// Paginated browse state
///
/// Holds the current page, the fixed page size, the last known total, and
/// the artists of the last committed browse fetch. Page transitions are
/// validated here; whether a fetch may fire at all (mode exclusivity with
/// the search path) is decided by the controller.
#[derive(Debug, Clone)]
pub struct PaginationStore {
    page: u32,
    per_page: u32,
    total: u64,
    artists: Vec<Artist>,
}

impl PaginationStore {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total: 0,
            artists: Vec::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Number of pages implied by the last known total
    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(self.per_page as u64) as u32
    }

    /// Commit a page transition. Out-of-range requests are silently ignored,
    /// matching the view's disabled boundary buttons; returns whether the
    /// transition was accepted and a browse fetch should follow.
    pub fn set_page(&mut self, page: u32) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Record a successful browse fetch: replaces the artist list and the
    /// total. If the total shrank past the current page, the page is pulled
    /// back into range.
    pub fn commit(&mut self, artists: Vec<Artist>, total: u64) {
        self.artists = artists;
        self.total = total;
        let pages = self.total_pages();
        if pages > 0 && self.page > pages {
            self.page = pages;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::artist;

    fn store_with_total(per_page: u32, total: u64) -> PaginationStore {
        let mut store = PaginationStore::new(per_page);
        store.commit(Vec::new(), total);
        store
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(store_with_total(20, 45).total_pages(), 3);
        assert_eq!(store_with_total(20, 40).total_pages(), 2);
        assert_eq!(store_with_total(20, 0).total_pages(), 0);
        assert_eq!(store_with_total(20, 1).total_pages(), 1);
    }

    #[test]
    fn test_out_of_range_pages_are_ignored() {
        // total=45, per_page=20 -> 3 pages
        let mut store = store_with_total(20, 45);

        assert!(!store.set_page(0));
        assert_eq!(store.page(), 1);

        assert!(!store.set_page(4));
        assert_eq!(store.page(), 1);

        assert!(store.set_page(2));
        assert_eq!(store.page(), 2);
    }

    #[test]
    fn test_no_navigation_before_first_total() {
        let mut store = PaginationStore::new(20);
        assert!(!store.set_page(1));
        assert!(!store.set_page(2));
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_commit_replaces_list_and_total() {
        let mut store = PaginationStore::new(2);
        store.commit(vec![artist("a1", "Nova"), artist("a2", "Lumen")], 5);
        assert_eq!(store.artists().len(), 2);
        assert_eq!(store.total(), 5);
        assert_eq!(store.total_pages(), 3);
    }

    #[test]
    fn test_commit_clamps_page_when_total_shrinks() {
        let mut store = store_with_total(20, 100);
        assert!(store.set_page(5));
        store.commit(Vec::new(), 45);
        assert_eq!(store.page(), 3);
    }
}
