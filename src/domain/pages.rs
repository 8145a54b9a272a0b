use super::models::{Page, PageId, PageKind, PageMeta};
use anyhow::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn list(&self) -> Result<Vec<PageMeta>>;
    async fn load(&self, id: &PageId) -> Result<Page>;
    /// Persist the body and bump `updated_at`; returns the stored metadata.
    async fn save(&self, page: &Page) -> Result<PageMeta>;
    async fn create(&self, title: &str, kind: PageKind, body: &str) -> Result<Page>;
    async fn delete(&self, id: &PageId) -> Result<()>;

    fn root(&self) -> std::path::PathBuf;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: PageKind,
    pub body: &'static str,
}

#[must_use]
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            name: "Blank note",
            description: "An empty page",
            kind: PageKind::Note,
            body: "",
        },
        Template {
            name: "Monthly budget",
            description: "Income and spending grouped by category",
            kind: PageKind::Budget,
            body: "# Income\n\
                   +0 salary\n\
                   \n\
                   # Housing\n\
                   - [ ] -0 rent\n\
                   - [ ] -0 electricity\n\
                   \n\
                   # Food\n\
                   - [ ] -0 groceries\n\
                   \n\
                   # Transport\n\
                   - [ ] -0 fuel\n",
        },
        Template {
            name: "Savings plan",
            description: "Track what you set aside each month",
            kind: PageKind::Budget,
            body: "# Savings\n\
                   +0 carried over\n\
                   - [ ] -0 emergency fund\n\
                   - [ ] -0 investments\n",
        },
    ]
}

/// Sidebar ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSort {
    #[default]
    Updated,
    Title,
}

impl PageSort {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            PageSort::Updated => PageSort::Title,
            PageSort::Title => PageSort::Updated,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PageSort::Updated => "recent",
            PageSort::Title => "title",
        }
    }

    pub fn apply(self, pages: &mut [PageMeta]) {
        match self {
            PageSort::Updated => pages.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            PageSort::Title => {
                pages.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            }
        }
    }
}
