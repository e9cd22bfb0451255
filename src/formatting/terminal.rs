use std::sync::Mutex;

use colored::*;

use super::issues::{format_progress, print_issues};
use crate::models::{Issue, IssueId, Progress};
use crate::presentation::{ModalBody, ModalDescriptor, Notification, Presenter, RowElement};
use crate::selection::{HeaderToggle, SessionContext};

fn terminal_color(name: &str) -> Color {
    match name {
        "lightgreen" | "green" => Color::BrightGreen,
        "orangered" | "red" => Color::Red,
        "white" => Color::White,
        "black" => Color::Black,
        other => Color::from(other),
    }
}

/// Renders the issue rows of one session on the terminal.
#[derive(Default)]
pub struct TerminalPresenter {
    rows: Mutex<Vec<RowElement>>,
    header: Mutex<HeaderToggle>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unchecked row per issue and counts it in the session.
    pub fn render_rows(&self, issues: &[Issue], session: &SessionContext) {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        for issue in issues {
            if session.register_row(&issue.url).is_some() {
                rows.push(RowElement::new(issue.id, false));
            }
        }
    }

    /// Adds rows for bare ids, e.g. ids given on the command line.
    pub fn render_ids(&self, ids: &[IssueId], session: &SessionContext) {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        for id in ids {
            if session.register_row(&format!("/issues/{}", id)).is_some() {
                rows.push(RowElement::new(*id, false));
            }
        }
    }

    pub fn rows(&self) -> Vec<RowElement> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Stores the checked flags of `updated` rows.
    pub fn update_rows(&self, updated: &[RowElement]) {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        for row in rows.iter_mut() {
            if let Some(new) = updated.iter().find(|u| u.issue_id == row.issue_id) {
                row.checked = new.checked;
            }
        }
    }

    pub fn header_toggle(&self) -> HeaderToggle {
        *self.header.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Presenter for TerminalPresenter {
    fn issue_element(&self, issue_id: IssueId) -> Option<RowElement> {
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|row| row.issue_id == issue_id)
            .cloned()
    }

    fn remove_row(&self, issue_id: IssueId) {
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|row| row.issue_id != issue_id);
    }

    fn set_header_toggle(&self, toggle: HeaderToggle) {
        *self.header.lock().unwrap_or_else(|e| e.into_inner()) = toggle;
    }

    fn notify(&self, notification: Notification) {
        let style = &notification.style;
        let line = format!(" {} ", notification.message)
            .color(terminal_color(&style.foreground))
            .on_color(terminal_color(&style.background));

        println!("{}", line);
        for (index, detail) in notification.details.iter().enumerate() {
            println!("  {}. {}", index + 1, detail);
        }
    }

    fn show_modal(&self, modal: ModalDescriptor) {
        println!("\n{}", modal.title.bold());

        match &modal.body {
            ModalBody::Issues(issues) => print_issues(issues, "table"),
            ModalBody::Message(message) => println!("{}", message.dimmed()),
        }

        let actions = modal
            .actions
            .iter()
            .map(|action| {
                let label = format!("[{}]", action.label);
                let styled = if action.enabled { label.bold() } else { label.dimmed() };
                styled.to_string()
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}\n", actions);
    }

    fn show_progress(&self, progress: &Progress) {
        eprintln!("{}", format_progress(progress).dimmed());
    }
}
