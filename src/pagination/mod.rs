pub mod collector;
pub mod pager;

pub use collector::{IssueCollector, PaginationRun};
pub use pager::IssuePager;
