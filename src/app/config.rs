use crate::domain::completion::DEFAULT_CONTEXT_CHARS;
use crate::domain::currency::CurrencyFormat;
use crate::theme::PaletteType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENDPOINT_ENV: &str = "OMITION_COMPLETION_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub max_context_chars: usize,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/generate".to_string(),
            max_context_chars: DEFAULT_CONTEXT_CHARS,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub notes_dir: Option<PathBuf>,
    pub theme: PaletteType,
    pub feedback_url: String,
    pub completion: CompletionConfig,
    pub currency: CurrencyFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notes_dir: None,
            theme: PaletteType::CatppuccinMocha,
            feedback_url: "https://omition.app/feedback".to_string(),
            completion: CompletionConfig::default(),
            currency: CurrencyFormat::default(),
        }
    }
}

#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("omition");
        path
    })
}

impl AppConfig {
    /// Read `path` (or `~/.config/omition/config.toml`). A missing file gives
    /// the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => config_dir().map(|dir| dir.join("config.toml")),
        };

        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str::<AppConfig>(&content)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            _ => AppConfig::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.completion.endpoint = endpoint;
            }
        }

        Ok(config)
    }

    /// Where pages live when the config does not say.
    #[must_use]
    pub fn notes_dir(&self) -> PathBuf {
        self.notes_dir.clone().unwrap_or_else(|| {
            config_dir()
                .map(|dir| dir.join("pages"))
                .unwrap_or_else(|| PathBuf::from("omition-pages"))
        })
    }
}
