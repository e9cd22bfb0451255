use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::pager::IssuePager;
use crate::client::BitbucketClient;
use crate::error::BbResult;
use crate::filtering::{first_page_path, IssueFilter};
use crate::models::{Issue, PageResult, Progress};

/// Counters scoped to a single collection run.
#[derive(Debug)]
pub struct PaginationRun {
    started: Instant,
    fetched: u64,
}

impl PaginationRun {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            fetched: 0,
        }
    }

    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Counts the raw items of `page` and estimates the run's progress.
    pub fn record_page(&mut self, page: &PageResult) -> Option<Progress> {
        self.fetched += page.values.len() as u64;

        Progress::estimate(
            self.fetched,
            page.size.unwrap_or(0),
            page.page,
            page.values.len(),
            self.elapsed(),
        )
    }
}

/// Walks every listing page and keeps the issues matching the page filter.
pub struct IssueCollector {
    client: Arc<BitbucketClient>,
}

impl IssueCollector {
    pub fn new(client: Arc<BitbucketClient>) -> Self {
        Self { client }
    }

    /// Collects every issue whose state is allowed by the hosting page's
    /// `status` filter and whose title contains `search_text` (ignoring case).
    ///
    /// `on_progress` is called at most once per page. Any failed page aborts
    /// the whole collection.
    pub async fn collect<F>(&self, search_text: &str, mut on_progress: F) -> BbResult<Vec<Issue>>
    where
        F: FnMut(&Progress),
    {
        let allowed_states = self.client.location().allowed_states();
        let filter = IssueFilter::new(allowed_states, search_text);
        let mut pager = IssuePager::new(&self.client, first_page_path(allowed_states));
        let mut run = PaginationRun::start();
        let mut results = Vec::new();

        while let Some(page) = pager.next_page().await {
            let page = page?;

            if let Some(progress) = run.record_page(&page) {
                debug!(
                    "fetched page {:?} ({} issues, ~{:.2}% in {}s (ETA: {}s))",
                    progress.page,
                    progress.fetched,
                    progress.percentage,
                    progress.elapsed.as_secs(),
                    progress.eta.as_secs()
                );
                on_progress(&progress);
            }

            results.extend(
                page.values
                    .into_iter()
                    .filter(|raw| filter.matches(raw))
                    .map(Issue::from),
            );
        }

        info!(
            "Collected {} matching issues from {} raw issues over {} pages",
            results.len(),
            run.fetched(),
            pager.fetches()
        );

        Ok(results)
    }
}
