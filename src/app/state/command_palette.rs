use crate::app::command_palette::{get_commands, search_commands, CommandKind, CommandSpec};
use crate::app::editor::{invocation, Invocation, TriggerRange};
use ratatui::layout::Rect;

/// Extra rows revealed past the edge when scrolling the selection into view.
pub const SCROLL_MARGIN: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteOutcome {
    /// Key consumed, palette stays open.
    Handled,
    /// Run the entry; the palette closes.
    Invoke(CommandKind),
    /// Start a completion request; the palette stays open until it lands.
    RequestCompletion,
    Close,
    /// Route the key elsewhere (usually the editor).
    NotHandled,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandPaletteState {
    pub query: String,
    pub matches: Vec<CommandSpec>,
    pub selected_index: usize,
    pub trigger: TriggerRange,
    /// Request id of the completion started from this palette, if any.
    pub completion_in_flight: Option<u64>,
    pub scroll_top: u16,
    /// Where the result list was last drawn, for mouse hit testing.
    pub list_area: Option<Rect>,
}

impl CommandPaletteState {
    #[must_use]
    pub fn open(trigger: TriggerRange) -> Self {
        Self {
            matches: search_commands(get_commands(), ""),
            trigger: TriggerRange {
                end: trigger.start + 1,
                ..trigger
            },
            ..Default::default()
        }
    }

    /// Refilter for a new query. The selection goes back to the top even if
    /// the previously selected entry is still listed.
    pub fn set_query(&mut self, query: &str) {
        self.trigger.end = self.trigger.start + 1 + query.chars().count();
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.matches = search_commands(get_commands(), query);
        self.selected_index = 0;
        self.scroll_top = 0;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&CommandSpec> {
        self.matches.get(self.selected_index)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.completion_in_flight.is_some()
    }

    pub fn on_key(&mut self, key: PaletteKey) -> PaletteOutcome {
        let len = self.matches.len();
        match key {
            PaletteKey::Down => {
                if len > 0 {
                    self.selected_index = (self.selected_index + 1) % len;
                }
                PaletteOutcome::Handled
            }
            PaletteKey::Up => {
                if len > 0 {
                    self.selected_index = (self.selected_index + len - 1) % len;
                }
                PaletteOutcome::Handled
            }
            PaletteKey::Enter => self.activate(self.selected_index),
            PaletteKey::Escape => PaletteOutcome::Close,
            PaletteKey::Other => PaletteOutcome::NotHandled,
        }
    }

    pub fn hover(&mut self, index: usize) {
        if index < self.matches.len() {
            self.selected_index = index;
        }
    }

    /// Activate the entry at `index` (Enter or click).
    pub fn activate(&mut self, index: usize) -> PaletteOutcome {
        let Some(cmd) = self.matches.get(index) else {
            return PaletteOutcome::Handled;
        };
        let kind = cmd.kind;
        self.selected_index = index;

        match invocation(kind) {
            Invocation::Completion if self.is_busy() => PaletteOutcome::Handled,
            Invocation::Completion => PaletteOutcome::RequestCompletion,
            _ => PaletteOutcome::Invoke(kind),
        }
    }

    pub fn begin_completion(&mut self, request_id: u64) {
        self.completion_in_flight = Some(request_id);
    }

    /// Clears the busy flag if `request_id` is the one in flight.
    pub fn finish_completion(&mut self, request_id: u64) -> bool {
        if self.completion_in_flight == Some(request_id) {
            self.completion_in_flight = None;
            true
        } else {
            false
        }
    }

    /// Keep the selected row visible in a list `viewport` rows tall.
    pub fn sync_scroll(&mut self, viewport: u16) {
        let item_top = u16::try_from(self.selected_index).unwrap_or(u16::MAX);
        let scroll = scroll_offset(viewport, self.scroll_top, item_top, 1);
        let len = u16::try_from(self.matches.len()).unwrap_or(u16::MAX);
        self.scroll_top = scroll.min(len.saturating_sub(viewport));
    }
}

/// New scroll position that brings `[item_top, item_top + item_height)` into
/// a container of `container_height`, overshooting by [`SCROLL_MARGIN`].
#[must_use]
pub fn scroll_offset(container_height: u16, scroll_top: u16, item_top: u16, item_height: u16) -> u16 {
    let bottom = item_top.saturating_add(item_height);
    if item_top < scroll_top {
        item_top.saturating_sub(SCROLL_MARGIN)
    } else if bottom > container_height.saturating_add(scroll_top) {
        (bottom - container_height).saturating_add(SCROLL_MARGIN)
    } else {
        scroll_top
    }
}
