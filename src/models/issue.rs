use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub type IssueId = u64;

/// One entry of the issue listing as the REST API returns it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawIssue {
    pub id: IssueId,
    pub title: String,
    pub state: String,
    pub kind: String,
    pub created_on: DateTime<FixedOffset>,
    pub links: IssueLinks,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IssueLinks {
    pub html: Link,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    pub url: String,
    pub created_on: DateTime<FixedOffset>,
    pub kind: String,
    pub state: String,
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        Issue {
            id: raw.id,
            title: raw.title,
            url: raw.links.html.href,
            created_on: raw.created_on,
            kind: raw.kind,
            state: raw.state,
        }
    }
}
