use crate::app::{
    action::Action,
    state::{AppMode, AppState, PaletteKey},
    ui,
};
use crate::components::modals::helpers::contains;
use crate::components::sidebar::list_offset;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    match event {
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        Event::Key(key) => map_key(key, app_state),
        Event::Mouse(mouse) => {
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            map_mouse(mouse, app_state, area)
        }
        _ => None,
    }
}

fn map_key(key: KeyEvent, app_state: &AppState<'_>) -> Option<Action> {
    if app_state.mode == AppMode::CommandPalette && key.modifiers.is_empty() {
        let palette_key = match key.code {
            KeyCode::Up => Some(PaletteKey::Up),
            KeyCode::Down => Some(PaletteKey::Down),
            KeyCode::Enter => Some(PaletteKey::Enter),
            KeyCode::Esc => Some(PaletteKey::Escape),
            _ => None,
        };
        if let Some(palette_key) = palette_key {
            return Some(Action::PaletteKey(palette_key));
        }
    }

    if let Some(action) = app_state.keymap.get_action(key, app_state.mode) {
        return Some(action);
    }

    match app_state.mode {
        AppMode::Editor | AppMode::CommandPalette => Some(Action::EditorInput(key)),
        AppMode::Sidebar | AppMode::TemplateSelection => None,
    }
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState<'_>, area: Rect) -> Option<Action> {
    let (col, row) = (mouse.column, mouse.row);

    match app_state.mode {
        AppMode::TemplateSelection => return None,
        AppMode::CommandPalette => {
            if let Some(action) = map_palette_mouse(mouse, app_state) {
                return Some(action);
            }
        }
        AppMode::Editor | AppMode::Sidebar => {}
    }

    let layout = ui::get_layout(area, app_state);

    if contains(layout.sidebar, col, row) {
        return match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::SidebarPrev),
            MouseEventKind::ScrollDown => Some(Action::SidebarNext),
            MouseEventKind::Down(MouseButton::Left) => sidebar_row(app_state, layout.sidebar, row),
            _ => None,
        };
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if contains(layout.summary, col, row) => {
            Some(Action::ToggleSummaryDetail)
        }
        MouseEventKind::Down(MouseButton::Left)
            if contains(layout.editor, col, row) && app_state.mode == AppMode::Sidebar =>
        {
            Some(Action::FocusEditor)
        }
        _ => None,
    }
}

/// Hover highlights, click runs, scroll moves the selection; a click
/// elsewhere closes the palette.
fn map_palette_mouse(mouse: MouseEvent, app_state: &AppState<'_>) -> Option<Action> {
    let cp = app_state.command_palette.as_ref()?;
    let list = cp.list_area?;
    let inside = contains(list, mouse.column, mouse.row);
    let index = (mouse.row.saturating_sub(list.y) + cp.scroll_top) as usize;

    match mouse.kind {
        MouseEventKind::Moved if inside => Some(Action::PaletteHover(index)),
        MouseEventKind::Down(MouseButton::Left) if inside => Some(Action::PaletteClick(index)),
        MouseEventKind::Down(_) => Some(Action::PaletteKey(PaletteKey::Escape)),
        MouseEventKind::ScrollUp if inside => Some(Action::PaletteKey(PaletteKey::Up)),
        MouseEventKind::ScrollDown if inside => Some(Action::PaletteKey(PaletteKey::Down)),
        _ => None,
    }
}

fn sidebar_row(app_state: &AppState<'_>, sidebar: Rect, row: u16) -> Option<Action> {
    let inner_top = sidebar.y + 1;
    let inner_height = sidebar.height.saturating_sub(2);
    if row < inner_top || row >= inner_top + inner_height {
        return None;
    }
    let offset = list_offset(app_state.sidebar.selected_index, inner_height as usize);
    let index = offset + (row - inner_top) as usize;
    (index < app_state.sidebar.pages.len()).then_some(Action::SidebarSelect(index))
}
