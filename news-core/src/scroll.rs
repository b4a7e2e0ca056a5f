/// Decides when a reader paging through the accumulated list is close
/// enough to the end that the next page should be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfiniteScroll {
    /// How many unread items may remain before loading more.
    pub threshold: usize,
}

impl Default for InfiniteScroll {
    fn default() -> Self {
        Self { threshold: 5 }
    }
}

impl InfiniteScroll {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// `viewed_end` is the index one past the last item shown so far.
    pub fn should_load_more(
        &self,
        viewed_end: usize,
        loaded: usize,
        has_next_page: bool,
        loading: bool,
    ) -> bool {
        has_next_page && !loading && loaded.saturating_sub(viewed_end) <= self.threshold
    }
}
