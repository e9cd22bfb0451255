use super::{ActionToken, ModalAction, ModalBody, ModalDescriptor};
use crate::constants::{ACTION_CANCEL, ACTION_DELETE, ACTION_SPAM};
use crate::models::Issue;
use crate::selection::SelectionState;

/// The modal listing the issues a collection run matched.
///
/// Bulk actions start disabled until a row is selected; with no rows they are
/// left out entirely and only Cancel remains.
pub fn results_modal(issues: Vec<Issue>, search_text: &str, states: &[String]) -> ModalDescriptor {
    let title = if issues.is_empty() {
        "No matched items".to_string()
    } else {
        format!("{} matched items", issues.len())
    };

    let has_rows = !issues.is_empty();
    let actions = vec![
        ModalAction {
            id: ACTION_CANCEL.to_string(),
            label: "Cancel".to_string(),
            enabled: true,
            token: ActionToken::Close,
        },
        ModalAction {
            id: ACTION_DELETE.to_string(),
            label: "Delete".to_string(),
            enabled: false,
            token: ActionToken::DeleteSelected,
        },
        ModalAction {
            id: ACTION_SPAM.to_string(),
            label: "SPAM".to_string(),
            enabled: false,
            token: ActionToken::MarkSelectedAsSpam,
        },
    ]
    .into_iter()
    .filter(|action| has_rows || action.enabled)
    .collect();

    let body = if has_rows {
        ModalBody::Issues(issues)
    } else {
        ModalBody::Message(format!(
            "There is no issue with status \"{}\" that matches \"{}\"",
            states.join("\", \""),
            search_text
        ))
    };

    ModalDescriptor {
        title,
        body,
        actions,
    }
}

/// Bulk actions are available while anything is selected.
pub fn action_enabled(state: &SelectionState) -> bool {
    !state.selected_issues.is_empty()
}
