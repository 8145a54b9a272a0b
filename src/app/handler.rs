use crate::app::{action::Action, command::Command};
use crate::domain::completion::CompletionService;
use crate::domain::models::Page;
use crate::domain::pages::PageStore;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Backends the runtime talks to.
#[derive(Clone)]
pub struct Services {
    pub pages: Arc<dyn PageStore>,
    pub completion: Arc<dyn CompletionService>,
}

/// Runs reducer commands as background tasks that report back as actions.
pub struct CommandHandler {
    services: Services,
    tx: mpsc::Sender<Action>,
    completion: Option<(u64, AbortHandle)>,
}

impl CommandHandler {
    #[must_use]
    pub fn new(services: Services, tx: mpsc::Sender<Action>) -> Self {
        Self {
            services,
            tx,
            completion: None,
        }
    }

    pub fn handle(&mut self, command: Command) -> Result<()> {
        let pages = self.services.pages.clone();
        let tx = self.tx.clone();

        match command {
            Command::LoadPages => {
                tokio::spawn(async move {
                    match pages.list().await {
                        Ok(list) => {
                            let _ = tx.send(Action::PagesLoaded(list)).await;
                        }
                        Err(e) => {
                            let _ = tx
                                .send(Action::ErrorOccurred(format!("Failed to list pages: {e}")))
                                .await;
                        }
                    }
                });
            }
            Command::OpenPage { save, open } => {
                tokio::spawn(async move {
                    if !save_first(pages.as_ref(), save, &tx).await {
                        return;
                    }
                    match pages.load(&open).await {
                        Ok(page) => {
                            let _ = tx.send(Action::PageLoaded(Box::new(page))).await;
                        }
                        Err(e) => {
                            let _ = tx
                                .send(Action::ErrorOccurred(format!(
                                    "Failed to open page {open}: {e}"
                                )))
                                .await;
                        }
                    }
                });
            }
            Command::SavePage(page) => {
                tokio::spawn(async move {
                    let _ = tx
                        .send(Action::OperationStarted(format!("Saving {}...", page.meta.title)))
                        .await;
                    save_first(pages.as_ref(), Some(page), &tx).await;
                });
            }
            Command::CreatePage {
                save,
                title,
                kind,
                body,
            } => {
                tokio::spawn(async move {
                    if !save_first(pages.as_ref(), save, &tx).await {
                        return;
                    }
                    match pages.create(&title, kind, &body).await {
                        Ok(page) => {
                            let _ = tx.send(Action::PageCreated(Box::new(page))).await;
                        }
                        Err(e) => {
                            let _ = tx
                                .send(Action::ErrorOccurred(format!("Failed to create page: {e}")))
                                .await;
                        }
                    }
                });
            }
            Command::DeletePage(id) => {
                tokio::spawn(async move {
                    match pages.delete(&id).await {
                        Ok(()) => {
                            let _ = tx.send(Action::PageDeleted(id)).await;
                        }
                        Err(e) => {
                            let _ = tx
                                .send(Action::ErrorOccurred(format!("Failed to delete page: {e}")))
                                .await;
                        }
                    }
                });
            }
            Command::RequestCompletion { request_id, prompt } => {
                if let Some((previous, handle)) = self.completion.take() {
                    tracing::debug!(request_id = previous, "superseding completion");
                    handle.abort();
                }
                let completion = self.services.completion.clone();
                let task = tokio::spawn(async move {
                    let result = completion.complete(&prompt).await;
                    let _ = tx.send(Action::CompletionFinished(request_id, result)).await;
                });
                self.completion = Some((request_id, task.abort_handle()));
            }
            Command::CancelCompletion(request_id) => match self.completion.take() {
                Some((id, handle)) if id == request_id => {
                    tracing::info!(request_id, "completion cancelled");
                    handle.abort();
                }
                other => self.completion = other,
            },
        }
        Ok(())
    }

    /// Request id of the completion task last started, if it has not been
    /// cancelled.
    #[must_use]
    pub fn completion_in_flight(&self) -> Option<u64> {
        self.completion
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(id, _)| *id)
    }
}

/// Save `page` if given, reporting the result. Returns false on failure so
/// that a following open or create does not discard the edits.
async fn save_first(pages: &dyn PageStore, page: Option<Page>, tx: &mpsc::Sender<Action>) -> bool {
    let Some(page) = page else {
        return true;
    };
    match pages.save(&page).await {
        Ok(meta) => {
            tracing::debug!(page = %meta.id, "page saved");
            let _ = tx.send(Action::PageSaved(meta)).await;
            true
        }
        Err(e) => {
            let _ = tx
                .send(Action::ErrorOccurred(format!(
                    "Failed to save page {}: {e}",
                    page.meta.title
                )))
                .await;
            false
        }
    }
}
