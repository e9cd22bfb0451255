use url::form_urlencoded::byte_serialize;

use crate::models::RawIssue;

/// Builds the listing query `state="X" OR state="Y" ...`.
pub fn state_query(states: &[String]) -> String {
    states
        .iter()
        .map(|state| format!("state=\"{}\"", state))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Relative path of the first listing page for the given states.
///
/// Spaces go out as `%20`; a literal `+` in a state is already `%2B`.
pub fn first_page_path(states: &[String]) -> String {
    let encoded: String = byte_serialize(state_query(states).as_bytes()).collect();
    format!("issues/?q={}", encoded.replace('+', "%20"))
}

/// Client-side filter applied to every fetched page.
#[derive(Debug, Clone)]
pub struct IssueFilter {
    allowed_states: Vec<String>,
    search: String,
}

impl IssueFilter {
    pub fn new(allowed_states: &[String], search_text: &str) -> Self {
        Self {
            allowed_states: allowed_states.to_vec(),
            search: search_text.to_lowercase(),
        }
    }

    /// An empty allowed-state set matches nothing; an empty search matches
    /// every title.
    pub fn matches(&self, issue: &RawIssue) -> bool {
        self.allowed_states.iter().any(|s| s == &issue.state)
            && (self.search.is_empty() || issue.title.to_lowercase().contains(&self.search))
    }
}
