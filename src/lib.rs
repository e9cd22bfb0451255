// Module declarations
pub mod batch;
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod filtering;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod presentation;
pub mod selection;


// Re-export commonly used items
pub use batch::BatchExecutor;
pub use client::{BitbucketClient, CredentialProvider, Credentials, PageLocation};
pub use error::{BbError, BbResult};
pub use models::*;
pub use pagination::IssueCollector;
pub use presentation::{Notification, Presenter, RowElement};
pub use selection::SessionContext;
