use log::info;

/// Track progress of season fetching
pub struct FetchProgress {
    total: usize,
    fetched: usize,
    empty: usize,
    failed: usize,
}

impl FetchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fetched: 0,
            empty: 0,
            failed: 0,
        }
    }

    pub fn increment_fetched(&mut self) {
        self.fetched += 1;
        self.log_progress();
    }

    pub fn increment_empty(&mut self) {
        self.empty += 1;
        self.log_progress();
    }

    pub fn increment_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.fetched + self.empty + self.failed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    fn log_progress(&self) {
        info!(
            "  → Progress: {}/{} ({} with data, {} empty, {} failed)",
            self.current_count(),
            self.total,
            self.fetched,
            self.empty,
            self.failed
        );
    }
}
