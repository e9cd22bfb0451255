use serde::Deserialize;

use super::RawIssue;

/// One page of a cursor-linked listing.
#[derive(Debug, Deserialize)]
pub struct PageResult {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub values: Vec<RawIssue>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u64>,
}

// Bitbucket error envelope: {"type": "error", "error": {"message": "..."}}
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}
