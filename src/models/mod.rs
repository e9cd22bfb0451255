pub mod batch;
pub mod issue;
pub mod page;
pub mod progress;

// Re-export commonly used types
pub use batch::{BatchResult, BatchTarget, ItemError, ItemSuccess};
pub use issue::{Issue, IssueId, IssueLinks, Link, RawIssue};
pub use page::{ErrorDetail, ErrorEnvelope, PageResult};
pub use progress::Progress;
