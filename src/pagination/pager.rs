use tracing::debug;

use crate::client::BitbucketClient;
use crate::error::BbResult;
use crate::models::PageResult;

enum Cursor {
    First(String),
    Next(String),
    Done,
}

/// Finite, forward-only sequence of listing pages.
///
/// The first request uses the filtered listing path; every later request
/// follows the `next` cursor of the previous page verbatim. Once a page has no
/// cursor, or a fetch fails, the pager is exhausted for good.
pub struct IssuePager<'a> {
    client: &'a BitbucketClient,
    cursor: Cursor,
    fetches: usize,
}

impl<'a> IssuePager<'a> {
    pub fn new(client: &'a BitbucketClient, first_path: impl Into<String>) -> Self {
        Self {
            client,
            cursor: Cursor::First(first_path.into()),
            fetches: 0,
        }
    }

    /// Number of page requests issued so far.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    pub async fn next_page(&mut self) -> Option<BbResult<PageResult>> {
        let target = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::First(path) => path,
            Cursor::Next(url) => url,
            Cursor::Done => return None,
        };

        self.fetches += 1;
        debug!("Fetching issue page #{}", self.fetches);

        let page = match self.client.list_issues_page(&target).await {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };

        if let Some(next) = page.next.as_ref().filter(|next| !next.is_empty()) {
            self.cursor = Cursor::Next(next.clone());
        }

        Some(Ok(page))
    }
}
