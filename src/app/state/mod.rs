use super::config::AppConfig;
use super::keymap::KeyMap;
use crate::domain::ledger::parse_line_items;
use crate::domain::models::Summary;
use crate::domain::summary::summarize;
use std::sync::Arc;
use std::time::Instant;

pub mod command_palette;
pub mod editor;
pub mod error;
pub mod sidebar;

// Re-exports
pub use command_palette::{CommandPaletteState, PaletteKey, PaletteOutcome};
pub use editor::{AppTextArea, EditorState};
pub use error::{ErrorSeverity, ErrorState};
pub use sidebar::{SidebarState, TemplateSelectionState};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Editor,            // Typing in the open page
    Sidebar,           // Browsing pages
    CommandPalette,    // Slash-command palette over the editor
    TemplateSelection, // Choosing a template for a new page
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,

    // --- Pages ---
    pub sidebar: SidebarState,
    pub editor: EditorState<'a>,

    // --- Derived ---
    // None until a page is open; the summary pane shows placeholders.
    pub summary: Option<Summary>,
    pub show_summary: bool,
    pub summary_expanded: bool,

    // --- Modals ---
    pub command_palette: Option<CommandPaletteState>,
    pub template_selection: Option<TemplateSelectionState>,
    pub next_request_id: u64,

    // --- Animation ---
    pub frame_count: u64,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub config: Arc<AppConfig>,
    pub theme: crate::theme::Theme,
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Editor,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            sidebar: SidebarState::default(),
            editor: EditorState::default(),
            summary: None,
            show_summary: true,
            summary_expanded: false,
            command_palette: None,
            template_selection: None,
            next_request_id: 1,
            frame_count: 0,
            keymap: Arc::new(KeyMap::default()),
            config: Arc::new(AppConfig::default()),
            theme: crate::theme::Theme::default(),
        }
    }
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            theme: crate::theme::Theme::from_palette_type(config.theme),
            config: Arc::new(config),
            ..Default::default()
        }
    }

    /// Re-run the aggregator over the editor buffer.
    pub fn recompute_summary(&mut self) {
        if self.editor.page.is_none() {
            self.summary = None;
            return;
        }
        let items = parse_line_items(self.editor.text_area.lines());
        self.summary = Some(summarize(&items));
    }

    pub fn allocate_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now() + std::time::Duration::from_secs(3));
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: ErrorSeverity) {
        self.last_error = Some(ErrorState::new(message, severity));
    }
}
