pub mod state_filter;

pub use state_filter::{first_page_path, state_query, IssueFilter};
