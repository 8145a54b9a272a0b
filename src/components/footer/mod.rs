mod groups;
mod types;

use crate::app::state::{AppState, ErrorSeverity};
use crate::theme::Theme;
pub use types::{FooterGroup, FooterItem};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        // Status segment
        let status_span = if let Some(err) = &state.last_error {
            let (label, style) = match err.severity {
                ErrorSeverity::Error => ("ERROR", theme.status_error),
                ErrorSeverity::Warning => ("WARN", theme.status_warn),
                ErrorSeverity::Info => ("INFO", theme.status_info),
            };
            Span::styled(format!("  {label}: {}  ", err.message), style)
        } else if let Some(msg) = &state.status_message {
            Span::styled(format!("  {msg}  "), theme.status_info)
        } else {
            Span::raw("")
        };

        let mut spans = Vec::new();
        if !status_span.content.is_empty() {
            spans.push(status_span);
            spans.push(Span::raw(" "));
        }

        let available_width = area.width.saturating_sub(2) as usize;
        let mut current_width = spans.iter().map(Span::width).sum::<usize>();

        for group in groups::get_groups(state) {
            for item in group.items {
                let key_str = format!(" {} ", item.key);
                let desc_str = format!(" {} ", item.desc);

                let item_width = key_str.chars().count() + desc_str.chars().count();
                if current_width + item_width + 1 > available_width {
                    break;
                }

                let key_style = if item.highlighted {
                    theme.header_active
                } else {
                    theme.footer_segment_key
                };

                spans.push(Span::styled(key_str, key_style));
                spans.push(Span::styled(desc_str, theme.footer_segment_val));
                spans.push(Span::raw(" "));
                current_width += item_width + 1;
            }
            spans.push(Span::raw(" "));
            current_width += 1;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}
