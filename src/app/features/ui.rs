use super::palette::close_palette;
use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState, ErrorSeverity},
};
use std::time::Instant;

/// Notices below error severity clear themselves after this long.
const NOTICE_SECS: i64 = 5;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            if state
                .status_clear_time
                .is_some_and(|at| Instant::now() >= at)
            {
                state.status_message = None;
                state.status_clear_time = None;
            }
            if state
                .last_error
                .as_ref()
                .is_some_and(|err| err.is_expired(chrono::Local::now(), NOTICE_SECS))
            {
                state.last_error = None;
            }
            UpdateResult::Handled(None)
        }
        Action::Resize(..) => UpdateResult::Handled(None),
        Action::Quit => {
            state.should_quit = true;
            UpdateResult::Handled(None)
        }
        Action::FocusSidebar => {
            let cancel = close_palette(state);
            state.mode = AppMode::Sidebar;
            UpdateResult::Handled(cancel)
        }
        Action::FocusEditor => {
            state.mode = AppMode::Editor;
            state.sidebar.pending_delete = None;
            UpdateResult::Handled(None)
        }
        Action::ToggleSummary => {
            state.show_summary = !state.show_summary;
            UpdateResult::Handled(None)
        }
        Action::ToggleSummaryDetail => {
            state.show_summary = true;
            state.summary_expanded = !state.summary_expanded;
            UpdateResult::Handled(None)
        }
        Action::CancelMode => {
            let cancel = close_palette(state);
            state.template_selection = None;
            state.sidebar.pending_delete = None;
            state.last_error = None;
            state.mode = AppMode::Editor;
            UpdateResult::Handled(cancel)
        }
        Action::OperationStarted(msg) => {
            state.status_message = Some(msg.clone());
            state.status_clear_time = None;
            UpdateResult::Handled(None)
        }
        Action::ErrorOccurred(msg) => {
            tracing::warn!(error = %msg, "operation failed");
            state.status_message = None;
            state.notify(msg.clone(), ErrorSeverity::Error);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}
