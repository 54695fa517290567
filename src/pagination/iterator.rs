use super::config::PaginationConfig;

/// Walks a listing that hands out a token for the next page
pub struct PageIterator {
    pages_fetched: usize,
    next_token: Option<String>,
    finished: bool,
    config: PaginationConfig,
}

impl PageIterator {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            pages_fetched: 0,
            next_token: None,
            finished: false,
            config,
        }
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Token to send with the next request; `None` for the first page
    pub fn token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn has_more(&self) -> bool {
        !self.finished && !self.has_reached_max()
    }

    pub fn has_reached_max(&self) -> bool {
        self.config.max_pages.is_some_and(|max| self.pages_fetched >= max)
    }

    /// Record a fetched page and the token it returned
    pub fn advance(&mut self, next_token: Option<String>) {
        self.pages_fetched += 1;
        self.finished = next_token.is_none();
        self.next_token = next_token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_when_no_token_is_returned() {
        let mut pages = PageIterator::new(PaginationConfig::new(10));
        assert!(pages.has_more());
        assert_eq!(pages.token(), None);

        pages.advance(Some("p2".into()));
        assert!(pages.has_more());
        assert_eq!(pages.token(), Some("p2"));

        pages.advance(None);
        assert!(!pages.has_more());
        assert_eq!(pages.pages_fetched(), 2);
    }

    #[test]
    fn test_stops_at_max_pages() {
        let mut pages = PageIterator::new(PaginationConfig::new(10).with_max_pages(1));
        pages.advance(Some("p2".into()));
        assert!(pages.has_reached_max());
        assert!(!pages.has_more());
    }
}
