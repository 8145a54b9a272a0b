use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    editor::{end_of_insert, invocation, jump, EditorHost, Invocation, TriggerRange},
    state::{AppMode, AppState, CommandPaletteState, ErrorSeverity, PaletteOutcome},
};
use crate::domain::completion::CompletionError;
use crossterm::event::{KeyCode, KeyEvent};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::EditorInput(key) => UpdateResult::Handled(editor_input(state, *key)),
        Action::PaletteKey(key) => {
            let Some(cp) = &mut state.command_palette else {
                return UpdateResult::Handled(None);
            };
            let outcome = cp.on_key(*key);
            UpdateResult::Handled(apply_outcome(state, outcome))
        }
        Action::PaletteHover(index) => {
            if let Some(cp) = &mut state.command_palette {
                cp.hover(*index);
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteClick(index) => {
            let Some(cp) = &mut state.command_palette else {
                return UpdateResult::Handled(None);
            };
            let outcome = cp.activate(*index);
            UpdateResult::Handled(apply_outcome(state, outcome))
        }
        Action::CompletionFinished(request_id, result) => {
            completion_finished(state, *request_id, result);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Close the palette, cancelling its completion request if one is running.
pub(crate) fn close_palette(state: &mut AppState) -> Option<Command> {
    let cp = state.command_palette.take()?;
    if state.mode == AppMode::CommandPalette {
        state.mode = AppMode::Editor;
    }
    cp.completion_in_flight.map(|id| {
        tracing::debug!(request_id = id, "cancelling completion with palette");
        Command::CancelCompletion(id)
    })
}

fn editor_input(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    if state.editor.page.is_none() {
        return None;
    }

    let modified = state.editor.text_area.input(key);
    if modified {
        state.editor.dirty = true;
        state.recompute_summary();
    }

    if state.command_palette.is_some() {
        return requery(state);
    }

    if modified && key.code == KeyCode::Char('/') {
        let area = &state.editor.text_area;
        if let Some(trigger) = slash_trigger(area.lines(), area.0.cursor()) {
            state.command_palette = Some(CommandPaletteState::open(trigger));
            state.mode = AppMode::CommandPalette;
        }
    }
    None
}

/// A `/` just typed at `cursor - 1` opens the palette when it starts a word.
fn slash_trigger(lines: &[String], (row, col): (usize, usize)) -> Option<TriggerRange> {
    let line = lines.get(row)?;
    let start = col.checked_sub(1)?;
    let mut chars = line.chars().skip(start.saturating_sub(1));
    if start > 0 {
        let before = chars.next()?;
        if !before.is_whitespace() {
            return None;
        }
    }
    (chars.next()? == '/').then_some(TriggerRange {
        row,
        start,
        end: col,
    })
}

/// Recompute the query from the text between the slash and the cursor.
fn requery(state: &mut AppState) -> Option<Command> {
    let Some(cp) = &mut state.command_palette else {
        return None;
    };
    let (row, col) = state.editor.text_area.0.cursor();
    let trigger = cp.trigger;

    let query = state
        .editor
        .text_area
        .lines()
        .get(row)
        .filter(|_| row == trigger.row && col > trigger.start)
        .and_then(|line| {
            let mut chars = line.chars().skip(trigger.start);
            if chars.next() != Some('/') {
                return None;
            }
            let query: String = chars.take(col - trigger.start - 1).collect();
            (!query.chars().any(char::is_whitespace)).then_some(query)
        });

    match query {
        Some(query) => {
            cp.set_query(&query);
            None
        }
        None => close_palette(state),
    }
}

fn apply_outcome(state: &mut AppState, outcome: PaletteOutcome) -> Option<Command> {
    match outcome {
        PaletteOutcome::Handled | PaletteOutcome::NotHandled => None,
        PaletteOutcome::Close => close_palette(state),
        PaletteOutcome::RequestCompletion => request_completion(state),
        PaletteOutcome::Invoke(kind) => {
            let cancel = close_palette_keeping_trigger(state);
            let Some((trigger, cancel)) = cancel else {
                return None;
            };
            let area = &mut state.editor.text_area;
            match invocation(kind) {
                Invocation::Edit(run) => {
                    run(area, trigger);
                    state.editor.dirty = true;
                    state.recompute_summary();
                }
                Invocation::Feedback => {
                    area.delete_range(trigger);
                    state.editor.dirty = true;
                    state.recompute_summary();
                    let url = state.config.feedback_url.clone();
                    state.set_status(format!("Send feedback at {url}"));
                }
                Invocation::Completion => {}
            }
            tracing::debug!(?kind, "palette command invoked");
            cancel
        }
    }
}

fn close_palette_keeping_trigger(state: &mut AppState) -> Option<(TriggerRange, Option<Command>)> {
    let trigger = state.command_palette.as_ref()?.trigger;
    Some((trigger, close_palette(state)))
}

fn request_completion(state: &mut AppState) -> Option<Command> {
    let trigger = state.command_palette.as_ref()?.trigger;
    let max_chars = state.config.completion.max_context_chars;

    // The prompt is everything before the slash.
    let area = &mut state.editor.text_area;
    let (row, col) = area.0.cursor();
    area.move_cursor(jump(trigger.row, trigger.start));
    let prompt = area.text_before_cursor(max_chars);
    area.move_cursor(jump(row, col));

    let request_id = state.allocate_request_id();
    if let Some(cp) = &mut state.command_palette {
        cp.begin_completion(request_id);
    }
    tracing::info!(request_id, prompt_chars = prompt.chars().count(), "requesting completion");
    Some(Command::RequestCompletion { request_id, prompt })
}

fn completion_finished(
    state: &mut AppState,
    request_id: u64,
    result: &Result<String, CompletionError>,
) {
    let current = state
        .command_palette
        .as_mut()
        .is_some_and(|cp| cp.finish_completion(request_id));
    if !current {
        tracing::debug!(request_id, "dropping stale completion result");
        return;
    }

    match result {
        Ok(text) => {
            let Some(cp) = state.command_palette.take() else {
                return;
            };
            state.mode = AppMode::Editor;
            let area = &mut state.editor.text_area;
            area.delete_range(cp.trigger);
            let start = area.0.cursor();
            area.insert_text(text);
            area.select(start, end_of_insert(start, text));
            state.editor.dirty = true;
            state.recompute_summary();
        }
        Err(err) => {
            let severity = match err {
                CompletionError::RateLimited => ErrorSeverity::Warning,
                CompletionError::Failed(_) => ErrorSeverity::Error,
            };
            state.notify(err.to_string(), severity);
        }
    }
}
