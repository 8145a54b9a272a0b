use crate::domain::completion::{CompletionError, CompletionService};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

/// Completion endpoint speaking `POST {"prompt": ...}` and answering with
/// the generated text as the response body.
pub struct HttpCompletion {
    http: Client,
    endpoint: String,
}

impl HttpCompletion {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("building completion HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

pub(crate) fn classify_status(status: StatusCode) -> Option<CompletionError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        Some(CompletionError::RateLimited)
    } else if !status.is_success() {
        Some(CompletionError::Failed(format!(
            "Completion request failed: {status}"
        )))
    } else {
        None
    }
}

#[async_trait]
impl CompletionService for HttpCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|e| CompletionError::Failed(format!("Completion request failed: {e}")))?;

        if let Some(err) = classify_status(response.status()) {
            tracing::warn!(status = %response.status(), "completion endpoint refused request");
            return Err(err);
        }

        response
            .text()
            .await
            .map_err(|e| CompletionError::Failed(format!("Reading completion failed: {e}")))
    }
}
