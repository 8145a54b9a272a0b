use crate::app::state::{AppMode, AppState};
use crate::components::editor_pane::{self, EditorPane};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::{command_palette, CommandPaletteModal, TemplateSelectionModal};
use crate::components::sidebar::Sidebar;
use crate::components::summary::SummaryPanel;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 28;
const SUMMARY_WIDTH: u16 = 34;
const SUMMARY_HEIGHT: u16 = 5;

pub struct AppLayout {
    pub header: Rect,
    pub sidebar: Rect,
    pub editor: Rect,
    /// Zero-sized when the summary is hidden.
    pub summary: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect, app_state: &AppState) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let body = main[1];
    let sidebar_width = if body.width >= 60 { SIDEBAR_WIDTH } else { 0 };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(body);

    let content = columns[1];
    let (editor, summary) = if !app_state.show_summary {
        (content, Rect::default())
    } else if content.width >= SUMMARY_WIDTH * 2 {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SUMMARY_WIDTH)])
            .split(content);
        (split[0], split[1])
    } else {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(SUMMARY_HEIGHT)])
            .split(content);
        (split[0], split[1])
    };

    AppLayout {
        header: main[0],
        sidebar: columns[0],
        editor,
        summary,
        footer: main[2],
    }
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let layout = get_layout(area, app_state);
    let theme = app_state.theme.clone();
    let editor_focused = matches!(app_state.mode, AppMode::Editor | AppMode::CommandPalette);

    editor_pane::apply_theme(&mut app_state.editor.text_area, &theme, editor_focused);

    {
        let state: &AppState = app_state;

        if !is_empty(layout.header) {
            f.render_widget(Header { state, theme: &theme }, layout.header);
        }

        if !is_empty(layout.sidebar) {
            f.render_widget(
                Sidebar {
                    state: &state.sidebar,
                    open_page: state.editor.page.as_ref().map(|p| &p.id),
                    focused: state.mode == AppMode::Sidebar,
                    theme: &theme,
                },
                layout.sidebar,
            );
        }

        if !is_empty(layout.editor) {
            f.render_widget(
                EditorPane {
                    editor: &state.editor,
                    focused: editor_focused,
                    theme: &theme,
                },
                layout.editor,
            );
        }

        if !is_empty(layout.summary) {
            f.render_widget(
                SummaryPanel {
                    summary: state.summary.as_ref(),
                    currency: &state.config.currency,
                    expanded: state.summary_expanded,
                    theme: &theme,
                },
                layout.summary,
            );
        }

        if !is_empty(layout.footer) {
            f.render_widget(Footer { state, theme: &theme }, layout.footer);
        }

        if let Some(ts) = &state.template_selection {
            f.render_widget(TemplateSelectionModal { theme: &theme, state: ts }, area);
        }
    }

    let (cursor_row, _) = app_state.editor.text_area.0.cursor();
    let frame_count = app_state.frame_count;
    if let Some(cp) = &mut app_state.command_palette {
        let popup = command_palette::popup_area(
            EditorPane::inner(layout.editor),
            area,
            cp.trigger,
            cursor_row,
            cp.matches.len(),
        );
        f.render_stateful_widget(
            CommandPaletteModal {
                theme: &theme,
                frame_count,
            },
            popup,
            cp,
        );
    }
}

fn is_empty(area: Rect) -> bool {
    area.width == 0 || area.height == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::editor::TriggerRange;
    use crate::app::state::{AppTextArea, CommandPaletteState};
    use crate::domain::models::{PageId, PageKind, PageMeta};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_layout_hides_summary() {
        let mut state = AppState::default();
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(get_layout(area, &state).summary.width, SUMMARY_WIDTH);
        state.show_summary = false;
        assert!(is_empty(get_layout(area, &state).summary));
    }

    #[test]
    fn test_narrow_layout_stacks_summary() {
        let state = AppState::default();
        let layout = get_layout(Rect::new(0, 0, 50, 30), &state);
        assert_eq!(layout.sidebar.width, 0);
        assert_eq!(layout.summary.height, SUMMARY_HEIGHT);
        assert_eq!(layout.summary.width, 50);
    }

    #[test]
    fn test_draw_records_palette_list_area() {
        let mut state = AppState::default();
        state.editor.text_area = AppTextArea::from_body("/");
        state.editor.page = Some(PageMeta {
            id: PageId("p".to_string()),
            title: "November".to_string(),
            kind: PageKind::Budget,
            updated_at: chrono::Utc::now(),
        });
        state.recompute_summary();
        state.command_palette = Some(CommandPaletteState::open(TriggerRange::default()));
        state.mode = AppMode::CommandPalette;

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut state)).unwrap();

        let cp = state.command_palette.as_ref().unwrap();
        assert_eq!(cp.list_area.unwrap().height, 8);
        let text = buffer_text(&terminal);
        assert!(text.contains("Continue writing"));
        assert!(text.contains("November"));
        assert!(text.contains("Rp 0"));
    }
}
