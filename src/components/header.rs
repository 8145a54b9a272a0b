use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[must_use]
pub fn spinner_frame(frame_count: u64) -> &'static str {
    SPINNER[(frame_count % SPINNER.len() as u64) as usize]
}

pub struct Header<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        let mut spans = vec![Span::styled(" ◆ OMITION ", theme.header_logo)];

        match &state.editor.page {
            Some(page) => {
                let marker = if state.editor.dirty { " ●" } else { "" };
                spans.push(Span::styled(
                    format!(" {}{marker} ", page.title),
                    theme.header_page,
                ));
                spans.push(Span::styled(
                    format!(" {} ", page.kind.label()),
                    theme.header_item,
                ));
            }
            None => spans.push(Span::styled(" no page open ", theme.header_item)),
        }

        if state
            .command_palette
            .as_ref()
            .is_some_and(|cp| cp.is_busy())
        {
            spans.push(Span::styled(
                format!(" {} writing ", spinner_frame(state.frame_count)),
                theme.header_active,
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(theme.header)
            .render(area, buf);
    }
}
