use std::sync::{Arc, Mutex, MutexGuard};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::IssueId;
use crate::presentation::RowElement;

lazy_static! {
    static ref ISSUE_HREF: Regex = Regex::new(r"/issues/(\d+)(?:[/?#]|$)").unwrap();
}

/// Checked/indeterminate flags of the "select all" header checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderToggle {
    pub checked: bool,
    pub indeterminate: bool,
}

impl HeaderToggle {
    pub fn compute(selected: usize, visible: usize) -> Self {
        let checked = visible > 0 && selected == visible;
        Self {
            checked,
            indeterminate: selected > 0 && selected < visible,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selected issue ids in selection order, without duplicates.
    pub selected_issues: Vec<IssueId>,
    pub visible_issues: usize,
    pub header_toggle: HeaderToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    SelectedIssues,
    VisibleIssues,
    HeaderToggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    SelectedIssues(Vec<IssueId>),
    VisibleIssues(usize),
    HeaderToggle(HeaderToggle),
}

/// Fields to overwrite; `None` leaves the current value alone.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub selected_issues: Option<Vec<IssueId>>,
    pub visible_issues: Option<usize>,
    pub header_toggle: Option<HeaderToggle>,
}

pub type ChangeListener = Arc<dyn Fn(&RowElement) + Send + Sync>;

/// Selection state shared by everything working on one issue list page.
///
/// All writes go through the internal mutex. Listeners are called after the
/// lock is released, so they may read the state themselves.
#[derive(Default)]
pub struct SessionContext {
    state: Mutex<SelectionState>,
    listeners: Mutex<Vec<ChangeListener>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the whole state.
    pub fn get(&self) -> SelectionState {
        lock(&self.state).clone()
    }

    pub fn get_field(&self, field: StateField) -> StateValue {
        let state = lock(&self.state);
        match field {
            StateField::SelectedIssues => StateValue::SelectedIssues(state.selected_issues.clone()),
            StateField::VisibleIssues => StateValue::VisibleIssues(state.visible_issues),
            StateField::HeaderToggle => StateValue::HeaderToggle(state.header_toggle),
        }
    }

    pub fn selected_issues(&self) -> Vec<IssueId> {
        lock(&self.state).selected_issues.clone()
    }

    pub fn visible_issues(&self) -> usize {
        lock(&self.state).visible_issues
    }

    pub fn set(&self, patch: StatePatch) {
        let mut state = lock(&self.state);
        if let Some(selected) = patch.selected_issues {
            state.selected_issues = selected;
        }
        if let Some(visible) = patch.visible_issues {
            state.visible_issues = visible;
        }
        if let Some(toggle) = patch.header_toggle {
            state.header_toggle = toggle;
        }
    }

    pub fn register_change_listener<F>(&self, listener: F)
    where
        F: Fn(&RowElement) + Send + Sync + 'static,
    {
        lock(&self.listeners).push(Arc::new(listener));
    }

    fn notify_listeners(&self, element: &RowElement) {
        let listeners = lock(&self.listeners).clone();
        for listener in listeners {
            listener(element);
        }
    }

    /// Counts a rendered row whose link points at an issue, returning its id.
    /// Rows without an issue link are not counted.
    pub fn register_row(&self, href: &str) -> Option<IssueId> {
        let issue_id = ISSUE_HREF
            .captures(href)
            .and_then(|caps| caps[1].parse::<IssueId>().ok())?;

        lock(&self.state).visible_issues += 1;
        Some(issue_id)
    }

    /// Applies a row checkbox change and recomputes the header toggle.
    pub fn toggle_selection(&self, element: &RowElement) -> HeaderToggle {
        let toggle = {
            let mut state = lock(&self.state);
            let index = state
                .selected_issues
                .iter()
                .position(|id| *id == element.issue_id);

            match (element.checked, index) {
                (true, None) => state.selected_issues.push(element.issue_id),
                (false, Some(index)) => {
                    state.selected_issues.remove(index);
                }
                _ => {}
            }

            state.header_toggle =
                HeaderToggle::compute(state.selected_issues.len(), state.visible_issues);
            state.header_toggle
        };

        debug!(
            "Issue {} {}",
            element.issue_id,
            if element.checked { "selected" } else { "unselected" }
        );

        self.notify_listeners(element);
        toggle
    }

    /// Checks or unchecks every given row, routing each through
    /// [`toggle_selection`](Self::toggle_selection).
    pub fn select_all(&self, rows: &mut [RowElement], checked: bool) -> HeaderToggle {
        let mut toggle = lock(&self.state).header_toggle;
        for row in rows.iter_mut() {
            row.checked = checked;
            toggle = self.toggle_selection(row);
        }
        toggle
    }

    /// Drops a deleted row from the selection.
    ///
    /// Returns `false` without touching anything when the id was not selected.
    /// The visible count only shrinks when the row was still checked.
    pub fn discard_deleted(&self, element: &RowElement) -> bool {
        {
            let mut state = lock(&self.state);
            let Some(index) = state
                .selected_issues
                .iter()
                .position(|id| *id == element.issue_id)
            else {
                return false;
            };

            state.selected_issues.remove(index);
            if element.checked {
                state.visible_issues = state.visible_issues.saturating_sub(1);
            }
            state.header_toggle =
                HeaderToggle::compute(state.selected_issues.len(), state.visible_issues);
        }

        self.notify_listeners(element);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session_with_rows(count: usize) -> SessionContext {
        let session = SessionContext::new();
        for id in 1..=count {
            session.register_row(&format!("/acme/widgets/issues/{}/some-title", id));
        }
        session
    }

    #[test]
    fn test_register_row_counts_only_issue_links() {
        let session = SessionContext::new();

        assert_eq!(session.register_row("/acme/widgets/issues/12/crash-on-start"), Some(12));
        assert_eq!(session.register_row("https://bitbucket.org/acme/widgets/issues/13"), Some(13));
        assert_eq!(session.register_row("/acme/widgets/wiki/Home"), None);
        assert_eq!(session.visible_issues(), 2);
    }

    #[test]
    fn test_toggle_adds_and_removes_in_order() {
        let session = session_with_rows(3);

        session.toggle_selection(&RowElement::new(3, true));
        session.toggle_selection(&RowElement::new(1, true));
        session.toggle_selection(&RowElement::new(3, true));
        assert_eq!(session.selected_issues(), vec![3, 1]);

        session.toggle_selection(&RowElement::new(2, true));
        session.toggle_selection(&RowElement::new(1, false));
        assert_eq!(session.selected_issues(), vec![3, 2]);
    }

    #[test]
    fn test_toggle_on_then_off_restores_selection() {
        let session = session_with_rows(4);
        session.toggle_selection(&RowElement::new(2, true));
        session.toggle_selection(&RowElement::new(4, true));
        let before = session.get();

        session.toggle_selection(&RowElement::new(1, true));
        session.toggle_selection(&RowElement::new(1, false));

        assert_eq!(session.get().selected_issues, before.selected_issues);
    }

    #[test]
    fn test_header_toggle_states() {
        let session = session_with_rows(2);

        let toggle = session.toggle_selection(&RowElement::new(1, true));
        assert_eq!(toggle, HeaderToggle { checked: false, indeterminate: true });

        let toggle = session.toggle_selection(&RowElement::new(2, true));
        assert_eq!(toggle, HeaderToggle { checked: true, indeterminate: false });

        session.toggle_selection(&RowElement::new(1, false));
        let toggle = session.toggle_selection(&RowElement::new(2, false));
        assert_eq!(toggle, HeaderToggle::default());
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let session = session_with_rows(1);
        let calls = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let calls = calls.clone();
            session.register_change_listener(move |element| {
                calls.lock().unwrap().push((name, element.issue_id));
            });
        }

        session.toggle_selection(&RowElement::new(1, true));

        assert_eq!(*calls.lock().unwrap(), vec![("first", 1), ("second", 1)]);
    }

    #[test]
    fn test_listener_can_read_state() {
        let session = Arc::new(session_with_rows(1));
        let seen = Arc::new(AtomicUsize::new(0));

        let reader = session.clone();
        let seen_clone = seen.clone();
        session.register_change_listener(move |_| {
            seen_clone.store(reader.selected_issues().len(), Ordering::SeqCst);
        });

        session.toggle_selection(&RowElement::new(1, true));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_select_all_then_none() {
        let session = session_with_rows(3);
        let mut rows: Vec<RowElement> = (1..=3).map(|id| RowElement::new(id, false)).collect();

        let toggle = session.select_all(&mut rows, true);
        assert!(toggle.checked);
        assert!(rows.iter().all(|row| row.checked));
        assert_eq!(session.selected_issues(), vec![1, 2, 3]);

        let toggle = session.select_all(&mut rows, false);
        assert!(!toggle.checked && !toggle.indeterminate);
        assert!(session.selected_issues().is_empty());
    }

    #[test]
    fn test_discard_deleted_only_touches_selected_rows() {
        let session = session_with_rows(3);
        session.toggle_selection(&RowElement::new(2, true));

        assert!(!session.discard_deleted(&RowElement::new(1, false)));
        assert_eq!(session.visible_issues(), 3);

        assert!(session.discard_deleted(&RowElement::new(2, true)));
        assert!(session.selected_issues().is_empty());
        assert_eq!(session.visible_issues(), 2);
    }

    #[test]
    fn test_discard_deleted_recomputes_header_toggle() {
        let session = session_with_rows(4);
        session.toggle_selection(&RowElement::new(1, true));
        session.toggle_selection(&RowElement::new(2, true));

        session.discard_deleted(&RowElement::new(1, true));
        assert_eq!(
            session.get().header_toggle,
            HeaderToggle { checked: false, indeterminate: true }
        );

        session.discard_deleted(&RowElement::new(2, true));
        let state = session.get();
        assert!(state.selected_issues.is_empty());
        assert_eq!(state.visible_issues, 2);
        assert_eq!(state.header_toggle, HeaderToggle::compute(0, 2));
        assert!(!state.header_toggle.indeterminate);
    }

    #[test]
    fn test_get_field_and_set() {
        let session = SessionContext::new();
        session.set(StatePatch {
            selected_issues: Some(vec![5, 6]),
            visible_issues: Some(4),
            ..Default::default()
        });

        assert_eq!(
            session.get_field(StateField::SelectedIssues),
            StateValue::SelectedIssues(vec![5, 6])
        );
        assert_eq!(
            session.get_field(StateField::VisibleIssues),
            StateValue::VisibleIssues(4)
        );
        assert_eq!(
            session.get_field(StateField::HeaderToggle),
            StateValue::HeaderToggle(HeaderToggle::default())
        );
    }
}
