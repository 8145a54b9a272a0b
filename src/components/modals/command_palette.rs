use crate::app::command_palette::CommandKind;
use crate::app::editor::TriggerRange;
use crate::app::state::CommandPaletteState;
use crate::components::header::spinner_frame;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, StatefulWidget, Widget},
};

use super::helpers::draw_drop_shadow;

const WIDTH: u16 = 48;
const MAX_VISIBLE: u16 = 8;

/// Where the palette pops up: just below the trigger, or above it when the
/// screen runs out.
#[must_use]
pub fn popup_area(
    editor_inner: Rect,
    screen: Rect,
    trigger: TriggerRange,
    cursor_row: usize,
    match_count: usize,
) -> Rect {
    let rows = u16::try_from(match_count).unwrap_or(u16::MAX).clamp(1, MAX_VISIBLE);
    let height = (rows + 2).min(screen.height);
    let width = WIDTH.min(screen.width);

    let visible_row = u16::try_from(cursor_row)
        .unwrap_or(u16::MAX)
        .min(editor_inner.height.saturating_sub(1));
    let anchor_y = editor_inner.y.saturating_add(visible_row);

    let y = if anchor_y + 1 + height <= screen.bottom() {
        anchor_y + 1
    } else {
        anchor_y.saturating_sub(height).max(screen.y)
    };
    let start = u16::try_from(trigger.start).unwrap_or(u16::MAX);
    let x = editor_inner
        .x
        .saturating_add(start)
        .min(screen.right().saturating_sub(width));

    Rect::new(x, y, width, height).intersection(screen)
}

pub struct CommandPaletteModal<'a> {
    pub theme: &'a Theme,
    pub frame_count: u64,
}

impl StatefulWidget for CommandPaletteModal<'_> {
    type State = CommandPaletteState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut CommandPaletteState) {
        if area.width == 0 || area.height == 0 {
            state.list_area = None;
            return;
        }

        let screen = buf.area;
        draw_drop_shadow(buf, area, screen);
        Clear.render(area, buf);

        let title = if state.is_busy() {
            format!(" {} writing ", spinner_frame(self.frame_count))
        } else if state.query.is_empty() {
            " COMMANDS ".to_string()
        } else {
            format!(" /{} ", state.query)
        };

        let block = Block::default()
            .title(Line::from(Span::styled(title, self.theme.header_active)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner = block.inner(area);
        block.render(area, buf);
        state.list_area = Some(inner);
        if inner.height == 0 {
            return;
        }

        if state.matches.is_empty() {
            let no_results = Line::from(Span::styled(
                " No matching commands",
                self.theme.list_item.add_modifier(Modifier::DIM),
            ));
            buf.set_line(inner.x, inner.y, &no_results, inner.width);
            return;
        }

        state.sync_scroll(inner.height);
        let top = state.scroll_top as usize;

        for (row, (idx, cmd)) in state
            .matches
            .iter()
            .enumerate()
            .skip(top)
            .take(inner.height as usize)
            .enumerate()
        {
            let selected = idx == state.selected_index;
            let style = if selected {
                self.theme.list_selected
            } else {
                self.theme.list_item
            };
            let busy = state.is_busy() && cmd.kind == CommandKind::ContinueWriting;
            let icon = if busy {
                spinner_frame(self.frame_count)
            } else {
                cmd.icon
            };

            let line = Line::from(vec![
                Span::styled(format!(" {icon:<3}"), self.theme.list_icon),
                Span::styled(format!("{:<17}", cmd.title), style),
                Span::styled(cmd.description, self.theme.dimmed),
            ]);
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}
