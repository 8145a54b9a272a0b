use crate::app::command::Command;
use crate::app::state::command_palette::PaletteKey;
use crate::domain::completion::CompletionError;
use crate::domain::models::{Page, PageId, PageMeta};

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Focus & Panels ---
    FocusSidebar,
    FocusEditor,
    ToggleSummary,
    ToggleSummaryDetail,
    CancelMode,

    // --- Sidebar / Pages ---
    SidebarNext,
    SidebarPrev,
    SidebarSelect(usize),
    OpenSelectedPage,
    ToggleSidebarSort,
    DeleteSelectedPage,
    ReloadPages,
    SavePage,
    EnterTemplateSelection,
    TemplateNext,
    TemplatePrev,
    CreateFromTemplate,

    // --- Editor ---
    EditorInput(crossterm::event::KeyEvent),

    // --- Command Palette ---
    PaletteKey(PaletteKey),
    PaletteHover(usize),
    PaletteClick(usize),

    // --- Async Results ---
    PagesLoaded(Vec<PageMeta>),
    PageLoaded(Box<Page>),
    PageCreated(Box<Page>),
    PageSaved(PageMeta),
    PageDeleted(PageId),
    CompletionFinished(u64, Result<String, CompletionError>),
    OperationStarted(String),
    ErrorOccurred(String),
    ExternalChangeDetected,
}
