use super::palette::close_palette;
use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, AppTextArea, EditorState, TemplateSelectionState},
};
use crate::domain::models::{Page, PageId, PageMeta};
use chrono::Local;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        // --- Sidebar ---
        Action::SidebarNext => {
            state.sidebar.select_next();
            UpdateResult::Handled(None)
        }
        Action::SidebarPrev => {
            state.sidebar.select_prev();
            UpdateResult::Handled(None)
        }
        Action::SidebarSelect(idx) => {
            if *idx < state.sidebar.pages.len() {
                state.sidebar.selected_index = *idx;
                state.sidebar.pending_delete = None;
                state.mode = AppMode::Sidebar;
            }
            UpdateResult::Handled(None)
        }
        Action::ToggleSidebarSort => {
            state.sidebar.toggle_sort();
            let label = state.sidebar.sort.label();
            state.set_status(format!("Sorted by {label}"));
            UpdateResult::Handled(None)
        }
        Action::OpenSelectedPage => UpdateResult::Handled(open_selected(state)),
        Action::DeleteSelectedPage => UpdateResult::Handled(delete_selected(state)),
        Action::ReloadPages | Action::ExternalChangeDetected => {
            UpdateResult::Handled(Some(Command::LoadPages))
        }
        Action::SavePage => {
            let Some(page) = current_page(&state.editor) else {
                state.set_status("No page open");
                return UpdateResult::Handled(None);
            };
            state.editor.dirty = false;
            UpdateResult::Handled(Some(Command::SavePage(page)))
        }

        // --- Templates ---
        Action::EnterTemplateSelection => {
            let cancel = close_palette(state);
            state.mode = AppMode::TemplateSelection;
            state.template_selection = Some(TemplateSelectionState::default());
            UpdateResult::Handled(cancel)
        }
        Action::TemplateNext => {
            if let Some(ts) = &mut state.template_selection {
                if !ts.templates.is_empty() {
                    ts.selected_index = (ts.selected_index + 1) % ts.templates.len();
                }
            }
            UpdateResult::Handled(None)
        }
        Action::TemplatePrev => {
            if let Some(ts) = &mut state.template_selection {
                let len = ts.templates.len();
                if len > 0 {
                    ts.selected_index = (ts.selected_index + len - 1) % len;
                }
            }
            UpdateResult::Handled(None)
        }
        Action::CreateFromTemplate => {
            let Some(ts) = state.template_selection.take() else {
                return UpdateResult::Handled(None);
            };
            state.mode = AppMode::Editor;
            let Some(template) = ts.templates.get(ts.selected_index) else {
                return UpdateResult::Handled(None);
            };
            let title = format!("{} {}", template.name, Local::now().format("%d %b %Y"));
            UpdateResult::Handled(Some(Command::CreatePage {
                save: take_dirty_page(&mut state.editor),
                title,
                kind: template.kind,
                body: template.body.to_string(),
            }))
        }

        // --- Async Results ---
        Action::PagesLoaded(pages) => UpdateResult::Handled(pages_loaded(state, pages.clone())),
        Action::PageLoaded(page) => UpdateResult::Handled(show_page(state, page)),
        Action::PageCreated(page) => {
            let mut pages = state.sidebar.pages.clone();
            pages.retain(|p| p.id != page.meta.id);
            pages.push(page.meta.clone());
            state.sidebar.set_pages(pages);
            state.set_status(format!("Created {}", page.meta.title));
            UpdateResult::Handled(show_page(state, page))
        }
        Action::PageSaved(meta) => {
            let mut pages = state.sidebar.pages.clone();
            if let Some(entry) = pages.iter_mut().find(|p| p.id == meta.id) {
                *entry = meta.clone();
            } else {
                pages.push(meta.clone());
            }
            state.sidebar.set_pages(pages);
            if let Some(open) = &mut state.editor.page {
                if open.id == meta.id {
                    *open = meta.clone();
                }
            }
            state.set_status(format!("Saved {}", meta.title));
            UpdateResult::Handled(None)
        }
        Action::PageDeleted(id) => UpdateResult::Handled(page_deleted(state, id)),

        _ => UpdateResult::NotHandled,
    }
}

fn current_page(editor: &EditorState) -> Option<Page> {
    editor.page.as_ref().map(|meta| Page {
        meta: meta.clone(),
        body: editor.text_area.body(),
    })
}

/// The open page if it has unsaved edits; clears the dirty flag.
fn take_dirty_page(editor: &mut EditorState) -> Option<Page> {
    if !editor.dirty {
        return None;
    }
    editor.dirty = false;
    current_page(editor)
}

fn open_selected(state: &mut AppState) -> Option<Command> {
    let id = state.sidebar.selected()?.id.clone();
    state.mode = AppMode::Editor;
    if state.editor.page.as_ref().is_some_and(|p| p.id == id) {
        return None;
    }
    Some(Command::OpenPage {
        save: take_dirty_page(&mut state.editor),
        open: id,
    })
}

fn delete_selected(state: &mut AppState) -> Option<Command> {
    let selected = state.sidebar.selected()?.clone();
    if state.sidebar.pending_delete.as_ref() == Some(&selected.id) {
        state.sidebar.pending_delete = None;
        return Some(Command::DeletePage(selected.id));
    }
    state.sidebar.pending_delete = Some(selected.id);
    state.set_status(format!("Press d again to delete {}", selected.title));
    None
}

fn pages_loaded(state: &mut AppState, pages: Vec<PageMeta>) -> Option<Command> {
    state.sidebar.set_pages(pages);

    let Some(open) = &state.editor.page else {
        if let Some(first) = state.sidebar.selected() {
            return Some(Command::OpenPage {
                save: None,
                open: first.id.clone(),
            });
        }
        if state.template_selection.is_none() {
            state.mode = AppMode::TemplateSelection;
            state.template_selection = Some(TemplateSelectionState::default());
        }
        return None;
    };

    // Pick up edits made outside the app, unless ours would be lost.
    let listed = state.sidebar.pages.iter().find(|p| p.id == open.id)?;
    if listed.updated_at > open.updated_at && !state.editor.dirty {
        tracing::info!(page = %open.id, "page changed on disk, reloading");
        return Some(Command::OpenPage {
            save: None,
            open: open.id.clone(),
        });
    }
    None
}

fn show_page(state: &mut AppState, page: &Page) -> Option<Command> {
    let cancel = close_palette(state);
    state.editor = EditorState {
        text_area: AppTextArea::from_body(&page.body),
        page: Some(page.meta.clone()),
        dirty: false,
    };
    state.sidebar.select_id(&page.meta.id);
    state.recompute_summary();
    cancel
}

fn page_deleted(state: &mut AppState, id: &PageId) -> Option<Command> {
    let mut pages = state.sidebar.pages.clone();
    let title = pages
        .iter()
        .find(|p| &p.id == id)
        .map_or_else(|| id.to_string(), |p| p.title.clone());
    pages.retain(|p| &p.id != id);
    state.sidebar.set_pages(pages);
    state.set_status(format!("Deleted {title}"));

    if state.editor.page.as_ref().is_some_and(|p| &p.id == id) {
        let cancel = close_palette(state);
        state.editor = EditorState::default();
        state.recompute_summary();
        if let Some(next) = state.sidebar.selected() {
            return Some(Command::OpenPage {
                save: None,
                open: next.id.clone(),
            });
        }
        return cancel;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PageKind;
    use chrono::{TimeZone, Utc};

    fn meta(id: &str, title: &str, day: u32) -> PageMeta {
        PageMeta {
            id: PageId(id.to_string()),
            title: title.to_string(),
            kind: PageKind::Budget,
            updated_at: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
        }
    }

    fn page(id: &str, body: &str) -> Box<Page> {
        Box::new(Page {
            meta: meta(id, id, 1),
            body: body.to_string(),
        })
    }

    fn run(state: &mut AppState, action: Action) -> Option<Command> {
        match update(state, &action) {
            UpdateResult::Handled(cmd) => cmd,
            UpdateResult::NotHandled => panic!("{action:?} not handled"),
        }
    }

    #[test]
    fn test_first_load_opens_newest_page() {
        let mut state = AppState::default();
        let cmd = run(
            &mut state,
            Action::PagesLoaded(vec![meta("old", "Old", 1), meta("new", "New", 9)]),
        );
        assert_eq!(
            cmd,
            Some(Command::OpenPage {
                save: None,
                open: PageId("new".to_string())
            })
        );
    }

    #[test]
    fn test_first_load_without_pages_offers_templates() {
        let mut state = AppState::default();
        assert_eq!(run(&mut state, Action::PagesLoaded(Vec::new())), None);
        assert_eq!(state.mode, AppMode::TemplateSelection);
        assert!(state.template_selection.is_some());
    }

    #[test]
    fn test_page_loaded_fills_editor_and_summary() {
        let mut state = AppState::default();
        assert!(state.summary.is_none());
        run(&mut state, Action::PageLoaded(page("a", "# Pay\n+100 salary\n-30 rent\n")));
        assert_eq!(state.editor.text_area.lines().len(), 3);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.totals.free_cash, 70);
        assert!(!state.editor.dirty);
    }

    #[test]
    fn test_switching_pages_saves_dirty_page_first() {
        let mut state = AppState::default();
        run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 2), meta("b", "B", 1)]));
        run(&mut state, Action::PageLoaded(page("a", "+1 x\n")));
        state.editor.dirty = true;

        run(&mut state, Action::SidebarNext);
        let cmd = run(&mut state, Action::OpenSelectedPage);
        let Some(Command::OpenPage { save, open }) = cmd else {
            panic!("expected open, got {cmd:?}");
        };
        assert_eq!(open.0, "b");
        let saved = save.unwrap();
        assert_eq!(saved.meta.id.0, "a");
        assert_eq!(saved.body, "+1 x\n");
        assert!(!state.editor.dirty);
    }

    #[test]
    fn test_opening_the_open_page_only_focuses() {
        let mut state = AppState::default();
        run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 2)]));
        run(&mut state, Action::PageLoaded(page("a", "")));
        state.mode = AppMode::Sidebar;
        assert_eq!(run(&mut state, Action::OpenSelectedPage), None);
        assert_eq!(state.mode, AppMode::Editor);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut state = AppState::default();
        run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 2), meta("b", "B", 1)]));
        assert_eq!(run(&mut state, Action::DeleteSelectedPage), None);
        assert_eq!(
            run(&mut state, Action::DeleteSelectedPage),
            Some(Command::DeletePage(PageId("a".to_string())))
        );
    }

    #[test]
    fn test_moving_selection_resets_delete_confirmation() {
        let mut state = AppState::default();
        run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 2), meta("b", "B", 1)]));
        run(&mut state, Action::DeleteSelectedPage);
        run(&mut state, Action::SidebarNext);
        assert_eq!(run(&mut state, Action::DeleteSelectedPage), None);
    }

    #[test]
    fn test_deleting_open_page_opens_next() {
        let mut state = AppState::default();
        run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 2), meta("b", "B", 1)]));
        run(&mut state, Action::PageLoaded(page("a", "+5 x\n")));
        let cmd = run(&mut state, Action::PageDeleted(PageId("a".to_string())));
        assert_eq!(
            cmd,
            Some(Command::OpenPage {
                save: None,
                open: PageId("b".to_string())
            })
        );
        assert!(state.editor.page.is_none());
        assert!(state.summary.is_none());
    }

    #[test]
    fn test_external_change_reloads_clean_page() {
        let mut state = AppState::default();
        run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 2)]));
        run(&mut state, Action::PageLoaded(page("a", "")));

        assert_eq!(
            run(&mut state, Action::ExternalChangeDetected),
            Some(Command::LoadPages)
        );
        let cmd = run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 20)]));
        assert!(matches!(cmd, Some(Command::OpenPage { save: None, .. })));

        state.editor.dirty = true;
        assert_eq!(
            run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 25)])),
            None
        );
    }

    #[test]
    fn test_create_from_template() {
        let mut state = AppState::default();
        run(&mut state, Action::EnterTemplateSelection);
        run(&mut state, Action::TemplateNext);
        let cmd = run(&mut state, Action::CreateFromTemplate);
        let Some(Command::CreatePage { title, kind, body, save }) = cmd else {
            panic!("expected create, got {cmd:?}");
        };
        assert!(title.starts_with("Monthly budget"));
        assert_eq!(kind, PageKind::Budget);
        assert!(body.contains("# Income"));
        assert!(save.is_none());
        assert_eq!(state.mode, AppMode::Editor);
        assert!(state.template_selection.is_none());
    }

    #[test]
    fn test_saved_meta_updates_sidebar_and_editor() {
        let mut state = AppState::default();
        run(&mut state, Action::PagesLoaded(vec![meta("a", "A", 2)]));
        run(&mut state, Action::PageLoaded(page("a", "")));
        run(&mut state, Action::PageSaved(meta("a", "A", 7)));
        assert_eq!(state.editor.page.as_ref().unwrap().updated_at, meta("a", "A", 7).updated_at);
        assert_eq!(state.sidebar.pages[0].updated_at, meta("a", "A", 7).updated_at);
    }
}
