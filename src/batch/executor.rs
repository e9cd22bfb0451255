use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::client::BitbucketClient;
use crate::error::{join_ids, BbError, BbResult};
use crate::models::{BatchResult, BatchTarget, IssueId, ItemError, ItemSuccess};
use crate::presentation::{Notification, Presenter};
use crate::selection::SessionContext;

/// Runs bulk operations over issue ids and reconciles the page afterwards.
pub struct BatchExecutor {
    client: Arc<BitbucketClient>,
    session: Arc<SessionContext>,
    presenter: Arc<dyn Presenter>,
}

impl BatchExecutor {
    pub fn new(
        client: Arc<BitbucketClient>,
        session: Arc<SessionContext>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            client,
            session,
            presenter,
        }
    }

    /// Deletes every target issue concurrently.
    ///
    /// A failed deletion only lands in `errors`; it never stops its siblings.
    /// Successfully deleted rows are removed from the page and the selection.
    pub async fn execute<T: Into<BatchTarget>>(&self, target: T) -> BbResult<BatchResult> {
        let target = target.into();
        let ids = target.ids().to_vec();

        info!("Deleting {} issue(s): {}", ids.len(), join_ids(&ids));

        let handles = ids.iter().map(|&issue_id| {
            let client = Arc::clone(&self.client);
            tokio::spawn(async move { (issue_id, client.delete_issue(issue_id).await) })
        });

        let outcomes = match join_all(handles)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, JoinError>>()
        {
            Ok(outcomes) => outcomes,
            Err(e) => return Err(self.aggregate_failure(ids, e.to_string())),
        };

        let result = partition(outcomes);
        self.clean_up(&result);
        self.report(&result);

        info!(
            "Batch delete finished: {} deleted, {} failed",
            result.success.len(),
            result.errors.len()
        );

        Ok(result)
    }

    /// The REST API offers no spam endpoint, so this only tells the user so.
    pub fn mark_as_spam<T: Into<BatchTarget>>(&self, target: T) {
        let target = target.into();
        warn!("Spam requested for {}; not supported", join_ids(target.ids()));

        self.presenter.notify(Notification::error(
            "Function not implemented. Bitbucket REST API for SPAM not yet available",
        ));
    }

    fn clean_up(&self, result: &BatchResult) {
        for ItemSuccess { issue_id } in &result.success {
            let Some(element) = self.presenter.issue_element(*issue_id) else {
                continue;
            };

            self.session.discard_deleted(&element);
            self.presenter.remove_row(*issue_id);
        }
    }

    fn report(&self, result: &BatchResult) {
        if !result.success.is_empty() {
            self.presenter.notify(Notification::success(format!(
                "The following {} issue(s) have been deleted successfully: {}",
                result.success.len(),
                join_ids(&result.deleted_ids())
            )));
        }

        if !result.errors.is_empty() {
            let details = result
                .errors
                .iter()
                .map(|ItemError { issue_id, error }| format!("{}: {}", issue_id, error))
                .collect();

            self.presenter.notify(
                Notification::error(format!(
                    "The following {} issue(s) have failed to delete:",
                    result.errors.len()
                ))
                .with_details(details),
            );
        }
    }

    fn aggregate_failure(&self, issue_ids: Vec<IssueId>, reason: String) -> BbError {
        error!("Batch delete aborted: {}", reason);

        self.presenter.notify(Notification::error(format!(
            "There was an issue deleting issue {}: {}",
            join_ids(&issue_ids),
            reason
        )));

        BbError::AggregateFailure { issue_ids, reason }
    }
}

/// Splits per-item outcomes, keeping request order within each group.
fn partition(outcomes: Vec<(IssueId, BbResult<()>)>) -> BatchResult {
    let mut result = BatchResult::default();

    for (issue_id, outcome) in outcomes {
        match outcome {
            Ok(()) => result.success.push(ItemSuccess { issue_id }),
            Err(e) => {
                warn!("Error deleting issue {}: {}", issue_id, e);
                result.errors.push(ItemError {
                    issue_id,
                    error: e.remote_message(),
                });
            }
        }
    }

    result
}
