use crate::app::state::{AppTextArea, EditorState};
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Push theme styles into the text area before it is drawn.
pub fn apply_theme(area: &mut AppTextArea, theme: &Theme, focused: bool) {
    area.set_style(theme.editor_text);
    area.set_selection_style(theme.editor_selection);
    if focused {
        area.set_cursor_style(theme.editor_cursor);
        area.set_cursor_line_style(theme.editor_cursor_line);
    } else {
        area.set_cursor_style(theme.editor_text);
        area.set_cursor_line_style(Style::default());
    }
}

pub struct EditorPane<'a> {
    pub editor: &'a EditorState<'a>,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl EditorPane<'_> {
    /// Area inside the border where text is drawn.
    #[must_use]
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let (border, title_style) = if self.focused {
            (theme.border_focus, theme.header_active)
        } else {
            (theme.border, theme.header_item)
        };
        let title = self
            .editor
            .page
            .as_ref()
            .map_or("EDITOR", |p| p.title.as_str());

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title.to_string(), title_style),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.editor.page.is_none() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("No page open", theme.dimmed)),
                Line::from(vec![
                    Span::styled(" Ctrl-N ", theme.footer_segment_key),
                    Span::styled(" start from a template", theme.dimmed),
                ]),
            ])
            .alignment(Alignment::Center);
            hint.render(inner, buf);
            return;
        }

        (&self.editor.text_area).render(inner, buf);
    }
}
