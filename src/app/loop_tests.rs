use super::*;
use crate::app::action::Action;
use crate::app::command::Command;
use crate::app::handler::{CommandHandler, Services};
use crate::app::state::{AppMode, AppState};
use crate::domain::completion::{CompletionError, CompletionService, MockCompletionService};
use crate::domain::models::{Page, PageId, PageKind, PageMeta};
use crate::domain::pages::MockPageStore;
use async_trait::async_trait;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

fn meta(id: &str) -> PageMeta {
    PageMeta {
        id: PageId(id.to_string()),
        title: format!("Page {id}"),
        kind: PageKind::Budget,
        updated_at: chrono::Utc::now(),
    }
}

fn services(pages: MockPageStore, completion: impl CompletionService + 'static) -> Services {
    Services {
        pages: Arc::new(pages),
        completion: Arc::new(completion),
    }
}

/// Answers after a long delay, for cancellation tests.
struct SlowCompletion;

#[async_trait]
impl CompletionService for SlowCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}

#[tokio::test]
async fn test_handle_command_error_propagation() {
    let mut mock = MockPageStore::new();
    mock.expect_load()
        .with(mockall::predicate::eq(PageId("missing".to_string())))
        .returning(|_| Err(anyhow::anyhow!("no such page")));

    let (tx, mut rx) = mpsc::channel(1);
    let mut handler = CommandHandler::new(services(mock, MockCompletionService::new()), tx);

    handler
        .handle(Command::OpenPage {
            save: None,
            open: PageId("missing".to_string()),
        })
        .unwrap();

    let action = rx.recv().await.unwrap();
    if let Action::ErrorOccurred(msg) = action {
        assert!(msg.contains("no such page"));
    } else {
        panic!("Expected Action::ErrorOccurred, got {action:?}");
    }
}

#[tokio::test]
async fn test_open_saves_dirty_page_first() {
    let mut mock = MockPageStore::new();
    let mut seq = mockall::Sequence::new();
    mock.expect_save()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|page| Ok(page.meta.clone()));
    mock.expect_load()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|id| {
            Ok(Page {
                meta: meta(&id.0),
                body: "+1 x\n".to_string(),
            })
        });

    let (tx, mut rx) = mpsc::channel(4);
    let mut handler = CommandHandler::new(services(mock, MockCompletionService::new()), tx);
    handler
        .handle(Command::OpenPage {
            save: Some(Page {
                meta: meta("a"),
                body: "-1 y\n".to_string(),
            }),
            open: PageId("b".to_string()),
        })
        .unwrap();

    assert!(matches!(rx.recv().await.unwrap(), Action::PageSaved(m) if m.id.0 == "a"));
    assert!(matches!(rx.recv().await.unwrap(), Action::PageLoaded(p) if p.meta.id.0 == "b"));
}

#[tokio::test]
async fn test_failed_save_does_not_switch_pages() {
    let mut mock = MockPageStore::new();
    mock.expect_save()
        .returning(|_| Err(anyhow::anyhow!("disk full")));
    mock.expect_load().never();

    let (tx, mut rx) = mpsc::channel(4);
    let mut handler = CommandHandler::new(services(mock, MockCompletionService::new()), tx);
    handler
        .handle(Command::OpenPage {
            save: Some(Page {
                meta: meta("a"),
                body: String::new(),
            }),
            open: PageId("b".to_string()),
        })
        .unwrap();

    let action = rx.recv().await.unwrap();
    assert!(matches!(action, Action::ErrorOccurred(ref msg) if msg.contains("disk full")));
    // The task ends after the failed save, dropping the sender.
    drop(handler);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_completion_result_reaches_state() {
    let mut completion = MockCompletionService::new();
    completion
        .expect_complete()
        .withf(|prompt: &str| prompt == "Budget notes ")
        .returning(|_| Ok("continued".to_string()));

    let (tx, mut rx) = mpsc::channel(1);
    let mut handler = CommandHandler::new(services(MockPageStore::new(), completion), tx);
    handler
        .handle(Command::RequestCompletion {
            request_id: 3,
            prompt: "Budget notes ".to_string(),
        })
        .unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        Action::CompletionFinished(3, Ok("continued".to_string()))
    );
}

#[tokio::test]
async fn test_rate_limit_becomes_warning() {
    let mut completion = MockCompletionService::new();
    completion
        .expect_complete()
        .returning(|_| Err(CompletionError::RateLimited));

    let (tx, mut rx) = mpsc::channel(1);
    let mut handler = CommandHandler::new(services(MockPageStore::new(), completion), tx);
    let mut state = AppState::default();
    state.editor.page = Some(meta("a"));
    for c in "/continue".chars() {
        let key = crossterm::event::KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        reducer::update(&mut state, Action::EditorInput(key));
    }
    let cmd = reducer::update(
        &mut state,
        Action::PaletteKey(crate::app::state::PaletteKey::Enter),
    )
    .unwrap();
    handler.handle(cmd).unwrap();

    let action = rx.recv().await.unwrap();
    reducer::update(&mut state, action);
    assert_eq!(state.mode, AppMode::CommandPalette);
    assert_eq!(
        state.last_error.unwrap().message,
        "You have reached your request limit for the day."
    );
}

#[tokio::test]
async fn test_cancel_completion_aborts_task() {
    let (tx, mut rx) = mpsc::channel(1);
    let mut handler = CommandHandler::new(services(MockPageStore::new(), SlowCompletion), tx);
    handler
        .handle(Command::RequestCompletion {
            request_id: 9,
            prompt: String::new(),
        })
        .unwrap();
    assert_eq!(handler.completion_in_flight(), Some(9));

    // Cancelling some other request leaves this one alone.
    handler.handle(Command::CancelCompletion(8)).unwrap();
    assert_eq!(handler.completion_in_flight(), Some(9));

    handler.handle(Command::CancelCompletion(9)).unwrap();
    assert_eq!(handler.completion_in_flight(), None);

    drop(handler);
    let next = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv()).await;
    assert!(matches!(next, Ok(None)), "aborted task must not report back");
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let mut pages = MockPageStore::new();
    pages.expect_root().returning(move || root.clone());
    pages.expect_list().returning(|| Ok(vec![meta("a"), meta("b")]));
    pages.expect_load().returning(|id| {
        Ok(Page {
            meta: meta(&id.0),
            body: "# Income\n+2.500.000 salary\n# Food\n- [ ] -40.000 rice\n".to_string(),
        })
    });
    pages.expect_save().returning(|page| Ok(page.meta.clone()));
    pages.expect_create().returning(|title, kind, body| {
        Ok(Page {
            meta: PageMeta {
                title: title.to_string(),
                kind,
                ..meta("new")
            },
            body: body.to_string(),
        })
    });
    pages.expect_delete().returning(|_| Ok(()));

    let mut completion = MockCompletionService::new();
    completion
        .expect_complete()
        .returning(|_| Ok("more words\nand a line".to_string()));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let app_state = AppState::default();

    let (event_tx, event_rx) = mpsc::channel(100);

    // Spawn a task to feed random events
    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let event = match rng.gen_range(0..100) {
                0..=5 => {
                    let w = rng.gen_range(10..200);
                    let h = rng.gen_range(10..100);
                    Event::Resize(w, h)
                }
                6..=15 => generate_random_mouse(&mut rng, ratatui::layout::Size::new(80, 24)),
                16..=25 => Event::Key(crossterm::event::KeyEvent::new(
                    KeyCode::Char('/'),
                    KeyModifiers::NONE,
                )),
                _ => generate_random_key(&mut rng),
            };
            if event_tx.send(Ok(event)).await.is_err() {
                break;
            }
            // Yield to allow the loop to process events
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
        // Send Quit
        let _ = event_tx
            .send(Ok(Event::Key(crossterm::event::KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::CONTROL,
            ))))
            .await;
    });

    // Run the real loop (with a test backend)
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(&mut terminal, app_state, services(pages, completion), event_rx),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    use crossterm::event::KeyEvent;
    let code = match rng.gen_range(0..20) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::PageUp,
        9 => KeyCode::PageDown,
        10 => KeyCode::Tab,
        11 => KeyCode::BackTab,
        12 => KeyCode::Delete,
        13 => KeyCode::Backspace,
        _ => {
            let c = match rng.gen_range(b' '..=b'~') as char {
                // Quitting is left to the final event.
                'q' => 'w',
                c => c,
            };
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    if rng.gen_bool(0.05) {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::ALT);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}

fn generate_random_mouse<R: Rng>(rng: &mut R, size: ratatui::layout::Size) -> Event {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    let kind = match rng.gen_range(0..5) {
        0 => MouseEventKind::Down(MouseButton::Left),
        1 => MouseEventKind::Down(MouseButton::Right),
        2 => MouseEventKind::ScrollUp,
        3 => MouseEventKind::ScrollDown,
        _ => MouseEventKind::Moved,
    };

    let column = rng.gen_range(0..size.width);
    let row = rng.gen_range(0..size.height);

    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: crossterm::event::KeyModifiers::empty(),
    })
}
