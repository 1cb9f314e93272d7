use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level client configuration shared across the app core.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfigInner {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(flatten, default)]
    inner: Arc<ClientConfigInner>,
}

impl Deref for ClientConfig {
    type Target = ClientConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ClientConfig {
    fn deref_mut(&mut self) -> &mut ClientConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Practice-management backend endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Log output knobs. `level` is a tracing directive such as `info` or `chairside=debug`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

// --- Default ---

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8080/api".to_owned(), timeout_seconds: 30 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false, max_files: 10 }
    }
}
