use serde::Serialize;

use super::IssueId;

/// Input of a batch operation: a single id or a list of ids.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTarget(Vec<IssueId>);

impl BatchTarget {
    pub fn ids(&self) -> &[IssueId] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IssueId> for BatchTarget {
    fn from(id: IssueId) -> Self {
        BatchTarget(vec![id])
    }
}

impl From<Vec<IssueId>> for BatchTarget {
    fn from(ids: Vec<IssueId>) -> Self {
        BatchTarget(ids)
    }
}

impl From<&[IssueId]> for BatchTarget {
    fn from(ids: &[IssueId]) -> Self {
        BatchTarget(ids.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSuccess {
    pub issue_id: IssueId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemError {
    pub issue_id: IssueId,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    pub success: Vec<ItemSuccess>,
    pub errors: Vec<ItemError>,
}

impl BatchResult {
    pub fn deleted_ids(&self) -> Vec<IssueId> {
        self.success.iter().map(|s| s.issue_id).collect()
    }
}
