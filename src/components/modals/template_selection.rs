use crate::app::state::TemplateSelectionState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Widget},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

pub struct TemplateSelectionModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a TemplateSelectionState,
}

impl Widget for TemplateSelectionModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.state.templates.len() as u16 * 2 + 2;
        let modal_area = centered_rect_fixed_height(50, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" NEW PAGE ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let items: Vec<ListItem> = self
            .state
            .templates
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let selected = i == self.state.selected_index;
                let (prefix, style) = if selected {
                    ("> ", self.theme.list_selected)
                } else {
                    ("  ", self.theme.list_item)
                };
                ListItem::new(vec![
                    Line::from(Span::styled(format!("{prefix}{}", template.name), style)),
                    Line::from(Span::styled(
                        format!("    {}", template.description),
                        self.theme.dimmed,
                    )),
                ])
            })
            .collect();

        List::new(items).block(block).render(modal_area, buf);
    }
}
