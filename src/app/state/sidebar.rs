use crate::domain::models::{PageId, PageMeta};
use crate::domain::pages::{builtin_templates, PageSort, Template};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SidebarState {
    pub pages: Vec<PageMeta>,
    pub selected_index: usize,
    pub sort: PageSort,
    pub loaded: bool,
    /// Set by the first delete keypress; the second one confirms.
    pub pending_delete: Option<PageId>,
}

impl SidebarState {
    pub fn set_pages(&mut self, pages: Vec<PageMeta>) {
        let current = self.selected().map(|p| p.id.clone());
        self.replace_pages(pages, current);
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggle();
        let current = self.selected().map(|p| p.id.clone());
        let pages = std::mem::take(&mut self.pages);
        self.replace_pages(pages, current);
    }

    fn replace_pages(&mut self, mut pages: Vec<PageMeta>, keep: Option<PageId>) {
        self.sort.apply(&mut pages);
        self.pages = pages;
        self.loaded = true;
        if let Some(pending) = &self.pending_delete {
            if !self.pages.iter().any(|p| &p.id == pending) {
                self.pending_delete = None;
            }
        }
        self.selected_index = keep
            .and_then(|id| self.pages.iter().position(|p| p.id == id))
            .unwrap_or(self.selected_index)
            .min(self.pages.len().saturating_sub(1));
    }

    #[must_use]
    pub fn selected(&self) -> Option<&PageMeta> {
        self.pages.get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        if !self.pages.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.pages.len();
        }
        self.pending_delete = None;
    }

    pub fn select_prev(&mut self) {
        if !self.pages.is_empty() {
            let len = self.pages.len();
            self.selected_index = (self.selected_index + len - 1) % len;
        }
        self.pending_delete = None;
    }

    pub fn select_id(&mut self, id: &PageId) {
        if let Some(idx) = self.pages.iter().position(|p| &p.id == id) {
            self.selected_index = idx;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSelectionState {
    pub selected_index: usize,
    pub templates: Vec<Template>,
}

impl Default for TemplateSelectionState {
    fn default() -> Self {
        Self {
            selected_index: 0,
            templates: builtin_templates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PageKind;
    use chrono::{TimeZone, Utc};

    fn meta(id: &str, title: &str, day: u32) -> PageMeta {
        PageMeta {
            id: PageId(id.to_string()),
            title: title.to_string(),
            kind: PageKind::Budget,
            updated_at: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_selection_follows_page_across_resort() {
        let mut sidebar = SidebarState::default();
        sidebar.set_pages(vec![meta("a", "Zeta", 1), meta("b", "Alpha", 2)]);
        sidebar.select_id(&PageId("a".to_string()));
        sidebar.toggle_sort();
        assert_eq!(sidebar.selected().unwrap().id.0, "a");
        assert_eq!(sidebar.pages[0].title, "Alpha");
    }

    #[test]
    fn test_selection_wraps() {
        let mut sidebar = SidebarState::default();
        sidebar.set_pages(vec![meta("a", "a", 1), meta("b", "b", 2)]);
        sidebar.select_prev();
        assert_eq!(sidebar.selected_index, 1);
        sidebar.select_next();
        assert_eq!(sidebar.selected_index, 0);
    }

    #[test]
    fn test_empty_sidebar_is_safe() {
        let mut sidebar = SidebarState::default();
        sidebar.set_pages(Vec::new());
        sidebar.select_next();
        sidebar.select_prev();
        assert!(sidebar.selected().is_none());
        assert!(sidebar.loaded);
    }
}
