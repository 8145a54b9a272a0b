use crate::app::{
    action::Action,
    command::Command,
    handler::{CommandHandler, Services},
    input::map_event_to_action,
    reducer,
    state::AppState,
    ui,
};
use crate::domain::models::Page;

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);
const DEBOUNCE: Duration = Duration::from_millis(500);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    services: Services,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, services, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    services: Services,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);
    let mut handler = CommandHandler::new(services.clone(), action_tx.clone());

    // Notes directory watcher
    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok_and(|evt| !evt.kind.is_access()) {
            let _ = notify_tx.try_send(());
        }
    })?;

    let notes_root = services.pages.root();
    if notes_root.exists() {
        watcher.watch(&notes_root, RecursiveMode::NonRecursive)?;
    }

    let action_tx_clone = action_tx.clone();
    tokio::spawn(async move {
        let mut pending = false;
        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(DEBOUNCE) => {
                        let _ = action_tx_clone.send(Action::ExternalChangeDetected).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    // Initial Load
    handler.handle(Command::LoadPages)?;
    tracing::info!(root = %notes_root.display(), "event loop started");

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = res?;
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            if let Some(cmd) = command {
                tracing::debug!(?cmd, "running command");
                handler.handle(cmd)?;
            }
        }
    }

    save_on_exit(&app_state, &services).await;
    tracing::info!("event loop finished");
    Ok(())
}

/// Write unsaved edits before leaving. Failures are logged; the terminal is
/// about to be restored and there is nowhere left to show them.
async fn save_on_exit(state: &AppState<'_>, services: &Services) {
    let (Some(meta), true) = (&state.editor.page, state.editor.dirty) else {
        return;
    };
    let page = Page {
        meta: meta.clone(),
        body: state.editor.text_area.body(),
    };
    match services.pages.save(&page).await {
        Ok(meta) => tracing::info!(page = %meta.id, "saved on exit"),
        Err(e) => tracing::error!(page = %page.meta.id, error = %e, "failed to save on exit"),
    }
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
