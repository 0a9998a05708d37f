//! Console settings
//!
//! Loaded from `iris.toml` (optional) with built-in defaults, then
//! overridden by CLI arguments / environment variables.

use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::Cli;

/// Where the streaming agent backend lives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Base URL of the backend
    pub base_url: String,
    /// Path of the agent invocation endpoint
    pub invoke_path: String,
    /// Path of the tool listing endpoint
    pub tools_path: String,
    /// Connect timeout for backend requests, in seconds
    pub connect_timeout_secs: u64,
}

/// Where the document storage API lives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Base URL of the app serving `/api/storage/{container}`
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub backend: BackendSettings,
    pub storage: StorageSettings,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file(Path::new("iris.toml"))
    }

    /// Load settings from the CLI-selected config file and apply CLI
    /// overrides (CLI > env vars > config file > defaults)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_file(&cli.config)?;
        settings.apply_cli_overrides(cli);
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .set_default("backend.base_url", "http://127.0.0.1:3001")?
            .set_default("backend.invoke_path", "/stream-test")?
            .set_default("backend.tools_path", "/get_tools")?
            .set_default("backend.connect_timeout_secs", 10)?
            .set_default("storage.base_url", "http://127.0.0.1:3000")?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(backend_url) = &cli.backend_url {
            self.backend.base_url = backend_url.clone();
        }
        if let Some(storage_url) = &cli.storage_url {
            self.storage.base_url = storage_url.clone();
        }
    }

    /// Full URL of the agent invocation endpoint
    pub fn invoke_url(&self) -> String {
        join_url(&self.backend.base_url, &self.backend.invoke_path)
    }

    /// Full URL of the tool listing endpoint
    pub fn tools_url(&self) -> String {
        join_url(&self.backend.base_url, &self.backend.tools_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
