#![allow(dead_code)]

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BbError {
    #[error("Invalid page location: {0}")]
    InvalidLocation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error! Status: {status}: {message}")]
    HttpStatus { status: StatusCode, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to delete {}: {reason}", join_ids(.issue_ids))]
    AggregateFailure { issue_ids: Vec<u64>, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),

    /// Already shown to the user through a notification.
    #[error("{0}")]
    Reported(String),
}

impl BbError {
    /// The message shown next to a failed issue id in batch reports.
    pub fn remote_message(&self) -> String {
        match self {
            BbError::HttpStatus { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_reported(&self) -> bool {
        matches!(self, BbError::Reported(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BbError::HttpStatus { status, .. } => Some(*status),
            BbError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub(crate) fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type BbResult<T> = Result<T, BbError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> BbResult<T>;
    fn with_context<F>(self, f: F) -> BbResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> BbResult<T> {
        self.map_err(|e| BbError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> BbResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| BbError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> BbResult<T> {
        self.ok_or_else(|| BbError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> BbResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| BbError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! bb_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::BbError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::BbError::$error_type(format!($fmt, $($arg)*))
    };
}
