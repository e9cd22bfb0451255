pub mod issues;
pub mod terminal;
pub mod utils;

pub use issues::{format_kind, format_progress, format_state_color, print_issues};
pub use terminal::TerminalPresenter;
pub use utils::{format_date_time, format_seconds, parse_issue_ids, truncate};
