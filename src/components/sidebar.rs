use crate::app::state::SidebarState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// First visible row for a list of `height` rows with `selected` in view.
#[must_use]
pub fn list_offset(selected: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    selected.saturating_sub(height - 1)
}

pub struct Sidebar<'a> {
    pub state: &'a SidebarState,
    pub open_page: Option<&'a crate::domain::models::PageId>,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let (border, title_style) = if self.focused {
            (theme.border_focus, theme.header_active)
        } else {
            (theme.border, theme.header_item)
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("PAGES", title_style),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.state.sort.label(), theme.dimmed),
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

        if !self.state.loaded {
            Paragraph::new(Span::styled(" loading...", theme.dimmed)).render(inner, buf);
            return;
        }
        if self.state.pages.is_empty() {
            Paragraph::new(Span::styled(" no pages yet", theme.dimmed)).render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let offset = list_offset(self.state.selected_index, height);
        let width = inner.width as usize;

        for (row, (idx, page)) in self
            .state
            .pages
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .enumerate()
        {
            let is_selected = idx == self.state.selected_index && self.focused;
            let is_open = self.open_page == Some(&page.id);
            let pending = self.state.pending_delete.as_ref() == Some(&page.id);

            let style = if is_selected {
                theme.list_selected
            } else if pending {
                theme.status_error
            } else {
                theme.list_item
            };
            let marker = if is_open { "▍" } else { " " };
            let date = page.updated_at.format("%d %b").to_string();
            let title_width = width.saturating_sub(date.len() + 2);
            let title: String = page.title.chars().take(title_width).collect();

            let line = Line::from(vec![
                Span::styled(marker, theme.list_icon),
                Span::styled(format!("{title:<title_width$}"), style),
                Span::styled(format!(" {date}"), theme.dimmed),
            ]);
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_offset_keeps_selection_visible() {
        assert_eq!(list_offset(0, 5), 0);
        assert_eq!(list_offset(4, 5), 0);
        assert_eq!(list_offset(5, 5), 1);
        assert_eq!(list_offset(3, 0), 0);
    }
}
