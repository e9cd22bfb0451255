use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bbissues::batch::BatchExecutor;
use bbissues::client::{BitbucketClient, CredentialProvider, Credentials, PageLocation, StaticCredentials};
use bbissues::presentation::{ModalDescriptor, Notification, Presenter, RowElement};
use bbissues::selection::{HeaderToggle, SessionContext};
use bbissues::{BbError, BbResult, IssueId};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_URL: &str = "https://bitbucket.org/acme/widgets/issues?status=new";

#[derive(Default)]
struct RecordingPresenter {
    rows: Mutex<Vec<RowElement>>,
    removed: Mutex<Vec<IssueId>>,
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingPresenter {
    fn with_rows(rows: Vec<RowElement>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    fn removed(&self) -> Vec<IssueId> {
        self.removed.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn issue_element(&self, issue_id: IssueId) -> Option<RowElement> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.issue_id == issue_id)
            .cloned()
    }

    fn remove_row(&self, issue_id: IssueId) {
        self.rows.lock().unwrap().retain(|row| row.issue_id != issue_id);
        self.removed.lock().unwrap().push(issue_id);
    }

    fn set_header_toggle(&self, _toggle: HeaderToggle) {}

    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    fn show_modal(&self, _modal: ModalDescriptor) {}
}

struct PanickingCredentials;

impl CredentialProvider for PanickingCredentials {
    fn credentials(&self) -> BbResult<Credentials> {
        panic!("credential store unavailable");
    }
}

fn client_with(server: &MockServer, credentials: Arc<dyn CredentialProvider>) -> Arc<BitbucketClient> {
    let client = BitbucketClient::new(&server.uri(), PageLocation::parse(PAGE_URL).unwrap(), credentials)
        .unwrap();
    Arc::new(client)
}

fn client(server: &MockServer) -> Arc<BitbucketClient> {
    client_with(server, Arc::new(StaticCredentials(Credentials::new("alice", "secret"))))
}

async fn mount_delete(server: &MockServer, issue_id: IssueId, response: ResponseTemplate) {
    Mock::given(method("DELETE"))
        .and(path(format!("/repositories/acme/widgets/issues/{}", issue_id)))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "type": "error",
        "error": { "message": "not found" }
    }))
}

/// Session with rows 1..=4 rendered and `selected` checked.
fn session_and_presenter(selected: &[IssueId]) -> (Arc<SessionContext>, Arc<RecordingPresenter>) {
    let session = Arc::new(SessionContext::new());
    let mut rows = Vec::new();

    for id in 1..=4u64 {
        session.register_row(&format!("/acme/widgets/issues/{}/title", id));
        let row = RowElement::new(id, selected.contains(&id));
        if row.checked {
            session.toggle_selection(&row);
        }
        rows.push(row);
    }

    (session, Arc::new(RecordingPresenter::with_rows(rows)))
}

#[tokio::test]
async fn test_partial_failure_is_isolated_and_reported() {
    let server = MockServer::start().await;
    mount_delete(&server, 1, ResponseTemplate::new(204)).await;
    mount_delete(&server, 2, not_found()).await;
    mount_delete(&server, 3, ResponseTemplate::new(204)).await;

    let (session, presenter) = session_and_presenter(&[1, 2]);
    let listener_calls = Arc::new(AtomicUsize::new(0));
    let calls = listener_calls.clone();
    session.register_change_listener(move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
    });

    let executor = BatchExecutor::new(client(&server), session.clone(), presenter.clone());
    let result = executor.execute(vec![1, 2, 3]).await.unwrap();

    assert_eq!(result.deleted_ids(), vec![1, 3]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].issue_id, 2);
    assert_eq!(result.errors[0].error, "not found");

    // only issue 1 was both selected and deleted
    assert_eq!(session.selected_issues(), vec![2]);
    assert_eq!(session.visible_issues(), 3);
    assert_eq!(session.get().header_toggle, HeaderToggle::compute(1, 3));
    assert!(session.get().header_toggle.indeterminate);
    assert_eq!(listener_calls.load(Ordering::SeqCst), 1);
    assert_eq!(presenter.removed(), vec![1, 3]);

    let notifications = presenter.notifications();
    assert_eq!(notifications.len(), 2);
    assert!(notifications[0].message.contains("2 issue(s) have been deleted successfully: 1, 3"));
    assert_eq!(notifications[0].style.background, "lightgreen");
    assert!(notifications[1].message.contains("1 issue(s) have failed to delete"));
    assert_eq!(notifications[1].details, vec!["2: not found".to_string()]);
    assert_eq!(notifications[1].style.background, "orangered");
}

#[tokio::test]
async fn test_single_id_is_normalized() {
    let server = MockServer::start().await;
    mount_delete(&server, 4, ResponseTemplate::new(204)).await;

    let (session, presenter) = session_and_presenter(&[]);
    let executor = BatchExecutor::new(client(&server), session.clone(), presenter.clone());

    let result = executor.execute(4u64).await.unwrap();

    assert_eq!(result.deleted_ids(), vec![4]);
    assert!(result.errors.is_empty());
    // an unselected row leaves the selection and visible count alone
    assert!(session.selected_issues().is_empty());
    assert_eq!(session.visible_issues(), 4);
    assert_eq!(presenter.removed(), vec![4]);
    assert_eq!(presenter.notifications().len(), 1);
}

#[tokio::test]
async fn test_all_failures_emit_only_error_notification() {
    let server = MockServer::start().await;
    mount_delete(&server, 1, not_found()).await;
    mount_delete(&server, 2, ResponseTemplate::new(403)).await;

    let (session, presenter) = session_and_presenter(&[1, 2]);
    let executor = BatchExecutor::new(client(&server), session.clone(), presenter.clone());

    let result = executor.execute(vec![1, 2]).await.unwrap();

    assert!(result.success.is_empty());
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[1].error, "Forbidden");
    assert_eq!(session.selected_issues(), vec![1, 2]);
    assert!(presenter.removed().is_empty());

    let notifications = presenter.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].details.len(), 2);
}

#[tokio::test]
async fn test_deleting_twice_surfaces_per_item_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repositories/acme/widgets/issues/1"))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repositories/acme/widgets/issues/1"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let (session, presenter) = session_and_presenter(&[1]);
    let executor = BatchExecutor::new(client(&server), session.clone(), presenter.clone());

    let first = executor.execute(1u64).await.unwrap();
    assert_eq!(first.deleted_ids(), vec![1]);

    let second = executor.execute(1u64).await.unwrap();
    assert!(second.success.is_empty());
    assert_eq!(second.errors[0].error, "not found");
}

#[tokio::test]
async fn test_empty_batch_sends_nothing() {
    let server = MockServer::start().await;
    let (session, presenter) = session_and_presenter(&[]);
    let executor = BatchExecutor::new(client(&server), session, presenter.clone());

    let result = executor.execute(Vec::<IssueId>::new()).await.unwrap();

    assert_eq!(result, Default::default());
    assert!(presenter.notifications().is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_aggregate_failure_names_whole_batch() {
    let server = MockServer::start().await;
    let (session, presenter) = session_and_presenter(&[1]);
    let executor = BatchExecutor::new(
        client_with(&server, Arc::new(PanickingCredentials)),
        session.clone(),
        presenter.clone(),
    );

    let result = executor.execute(vec![1, 2]).await;

    match result {
        Err(BbError::AggregateFailure { issue_ids, .. }) => assert_eq!(issue_ids, vec![1, 2]),
        other => panic!("Expected AggregateFailure, got {:?}", other),
    }

    let notifications = presenter.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message.starts_with("There was an issue deleting issue 1, 2"));
    assert_eq!(session.selected_issues(), vec![1]);
}

#[tokio::test]
async fn test_spam_is_reported_as_unsupported() {
    let server = MockServer::start().await;
    let (session, presenter) = session_and_presenter(&[]);
    let executor = BatchExecutor::new(client(&server), session, presenter.clone());

    executor.mark_as_spam(vec![1, 2]);

    let notifications = presenter.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message.contains("not yet available"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
