use crate::domain::models::{Page, PageId, PageKind};

/// Side effects requested by the reducer, run by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadPages,
    /// Save `save` (if dirty) before opening `open`.
    OpenPage {
        save: Option<Page>,
        open: PageId,
    },
    SavePage(Page),
    CreatePage {
        save: Option<Page>,
        title: String,
        kind: PageKind,
        body: String,
    },
    DeletePage(PageId),
    RequestCompletion {
        request_id: u64,
        prompt: String,
    },
    CancelCompletion(u64),
}
