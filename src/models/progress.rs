use std::time::Duration;

/// Snapshot of a collection run, emitted once per fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Raw items seen so far across all pages, before filtering.
    pub fetched: u64,
    pub page: Option<u32>,
    pub page_count: u64,
    pub page_size: usize,
    pub size: u64,
    pub elapsed: Duration,
    pub estimated_time: Duration,
    pub eta: Duration,
    pub percentage: f64,
}

impl Progress {
    /// Linear extrapolation from the items fetched so far.
    ///
    /// Returns `None` when either `fetched` or `size` is zero, since no
    /// meaningful estimate exists yet.
    pub fn estimate(
        fetched: u64,
        size: u64,
        page: Option<u32>,
        page_size: usize,
        elapsed: Duration,
    ) -> Option<Self> {
        if fetched == 0 || size == 0 {
            return None;
        }

        let estimated_time = elapsed.mul_f64(size as f64 / fetched as f64);
        let eta = estimated_time.saturating_sub(elapsed);
        let percentage = (100.0 * fetched as f64 / size as f64).clamp(0.0, 100.0);
        let page_count = if page_size > 0 {
            size.div_ceil(page_size as u64)
        } else {
            0
        };

        Some(Progress {
            fetched,
            page,
            page_count,
            page_size,
            size,
            elapsed,
            estimated_time,
            eta,
            percentage,
        })
    }
}
