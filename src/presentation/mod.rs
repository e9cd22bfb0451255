//! Surface the core drives; rendering lives behind the [`Presenter`] trait.

pub mod descriptors;

use std::time::Duration;

use crate::constants::{
    ERROR_BACKGROUND, ERROR_FOREGROUND, NOTIFICATION_TIMEOUT_MS, SUCCESS_BACKGROUND,
    SUCCESS_FOREGROUND,
};
use crate::models::{Issue, IssueId, Progress};
use crate::selection::HeaderToggle;

pub use descriptors::{action_enabled, results_modal};

/// A rendered row checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowElement {
    pub issue_id: IssueId,
    pub checked: bool,
}

impl RowElement {
    pub fn new(issue_id: IssueId, checked: bool) -> Self {
        Self { issue_id, checked }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationStyle {
    pub foreground: String,
    pub background: String,
    pub timeout: Duration,
}

impl NotificationStyle {
    pub fn success() -> Self {
        Self {
            foreground: SUCCESS_FOREGROUND.to_string(),
            background: SUCCESS_BACKGROUND.to_string(),
            timeout: Duration::from_millis(NOTIFICATION_TIMEOUT_MS),
        }
    }

    pub fn error() -> Self {
        Self {
            foreground: ERROR_FOREGROUND.to_string(),
            background: ERROR_BACKGROUND.to_string(),
            timeout: Duration::from_millis(NOTIFICATION_TIMEOUT_MS),
        }
    }
}

/// A dismissible message. `details` are rendered as a list under the message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub details: Vec<String>,
    pub style: NotificationStyle,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
            style: NotificationStyle::success(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
            style: NotificationStyle::error(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// What a modal action does; resolved by the presenter, never a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionToken {
    Close,
    DeleteSelected,
    MarkSelectedAsSpam,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalAction {
    pub id: String,
    pub label: String,
    pub enabled: bool,
    pub token: ActionToken,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalBody {
    Issues(Vec<Issue>),
    Message(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalDescriptor {
    pub title: String,
    pub body: ModalBody,
    pub actions: Vec<ModalAction>,
}

/// Rendering collaborator consumed by the core.
pub trait Presenter: Send + Sync {
    /// The row checkbox of `issue_id`, if that row is rendered.
    fn issue_element(&self, issue_id: IssueId) -> Option<RowElement>;

    fn remove_row(&self, issue_id: IssueId);

    fn set_header_toggle(&self, toggle: HeaderToggle);

    fn notify(&self, notification: Notification);

    fn show_modal(&self, modal: ModalDescriptor);

    fn show_progress(&self, _progress: &Progress) {}
}
