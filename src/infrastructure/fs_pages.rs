use crate::domain::{
    models::{Page, PageId, PageKind, PageMeta},
    pages::PageStore,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const INDEX_FILE: &str = "pages.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PageIndex {
    #[serde(default)]
    pages: Vec<PageMeta>,
}

/// Pages kept as Markdown bodies next to a TOML index.
pub struct FsPageStore {
    root: PathBuf,
    // Serialises read-modify-write cycles on the index file.
    index_lock: Mutex<()>,
}

impl FsPageStore {
    pub fn open(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("creating notes directory {}", root.display()))?;
        Ok(Self {
            root,
            index_lock: Mutex::new(()),
        })
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn body_path(&self, id: &PageId) -> Result<PathBuf> {
        if id.0.is_empty() || !id.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(anyhow!("Invalid page id: {id}"));
        }
        Ok(self.root.join(format!("{}.md", id.0)))
    }

    async fn read_index(&self) -> Result<PageIndex> {
        read_index_at(&self.index_path()).await
    }

    async fn write_index(&self, index: &PageIndex) -> Result<()> {
        let content = toml::to_string(index).context("serialising page index")?;
        tokio::fs::write(self.index_path(), content)
            .await
            .context("writing page index")
    }

    fn next_id(index: &PageIndex) -> PageId {
        let base = Utc::now().format("%Y%m%d-%H%M%S%3f").to_string();
        let mut candidate = base.clone();
        let mut n = 1;
        while index.pages.iter().any(|p| p.id.0 == candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        PageId(candidate)
    }
}

async fn read_index_at(path: &Path) -> Result<PageIndex> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => toml::from_str(&content)
            .with_context(|| format!("parsing page index {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PageIndex::default()),
        Err(e) => Err(e).with_context(|| format!("reading page index {}", path.display())),
    }
}

#[async_trait]
impl PageStore for FsPageStore {
    async fn list(&self) -> Result<Vec<PageMeta>> {
        Ok(self.read_index().await?.pages)
    }

    async fn load(&self, id: &PageId) -> Result<Page> {
        let index = self.read_index().await?;
        let meta = index
            .pages
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| anyhow!("Page {id} not found"))?;
        let path = self.body_path(id)?;
        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        Ok(Page { meta, body })
    }

    async fn save(&self, page: &Page) -> Result<PageMeta> {
        let _guard = self.index_lock.lock().await;
        let mut index = self.read_index().await?;
        let path = self.body_path(&page.meta.id)?;
        tokio::fs::write(&path, &page.body)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        let mut meta = page.meta.clone();
        meta.updated_at = Utc::now();
        match index.pages.iter_mut().find(|p| p.id == meta.id) {
            Some(existing) => *existing = meta.clone(),
            None => index.pages.push(meta.clone()),
        }
        self.write_index(&index).await?;
        tracing::debug!(page = %meta.id, bytes = page.body.len(), "page saved");
        Ok(meta)
    }

    async fn create(&self, title: &str, kind: PageKind, body: &str) -> Result<Page> {
        let _guard = self.index_lock.lock().await;
        let mut index = self.read_index().await?;
        let meta = PageMeta {
            id: Self::next_id(&index),
            title: title.to_string(),
            kind,
            updated_at: Utc::now(),
        };
        let path = self.body_path(&meta.id)?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        index.pages.push(meta.clone());
        self.write_index(&index).await?;
        tracing::info!(page = %meta.id, title, "page created");
        Ok(Page {
            meta,
            body: body.to_string(),
        })
    }

    async fn delete(&self, id: &PageId) -> Result<()> {
        let _guard = self.index_lock.lock().await;
        let mut index = self.read_index().await?;
        let before = index.pages.len();
        index.pages.retain(|p| &p.id != id);
        if index.pages.len() == before {
            return Err(anyhow!("Page {id} not found"));
        }
        let path = self.body_path(id)?;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(e).with_context(|| format!("removing {}", path.display()));
            }
        }
        self.write_index(&index).await?;
        tracing::info!(page = %id, "page deleted");
        Ok(())
    }

    fn root(&self) -> PathBuf {
        self.root.clone()
    }
}
