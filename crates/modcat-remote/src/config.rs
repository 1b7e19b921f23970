use crate::ProviderError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Catalog service serving `releases-<os>.json` indexes.
pub const DEFAULT_CATALOG_URL: &str = "https://public-cdn.cloud.unity3d.com/hub/prod";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    pub cache_dir: PathBuf,
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl ProviderConfig {
    pub fn new(cache_dir: impl Into<PathBuf>, catalog_url: &str) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            catalog_url: catalog_url.trim_end_matches('/').to_owned(),
            auth_token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_owned());
        self
    }

    /// Load config from `~/.config/modcat/config.json`.
    pub fn load_default() -> Result<Self, ProviderError> {
        let path = default_config_path()?;
        Self::load(&path)
    }

    /// Like [`load_default`](Self::load_default), but a missing file yields
    /// the built-in defaults (`~/.cache/modcat`, [`DEFAULT_CATALOG_URL`]).
    pub fn load_or_default() -> Result<Self, ProviderError> {
        let path = default_config_path()?;
        if path.exists() {
            return Self::load(&path);
        }
        Ok(Self::new(default_cache_dir()?, DEFAULT_CATALOG_URL))
    }

    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)
            .map_err(|e| ProviderError::Config(format!("invalid provider config: {e}")))?;
        config.catalog_url = config.catalog_url.trim_end_matches('/').to_owned();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ProviderError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ProviderError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_owned()
}

fn home_dir() -> Result<PathBuf, ProviderError> {
    let home =
        std::env::var("HOME").map_err(|_| ProviderError::Config("HOME not set".to_owned()))?;
    Ok(PathBuf::from(home))
}

fn default_config_path() -> Result<PathBuf, ProviderError> {
    Ok(home_dir()?.join(".config/modcat/config.json"))
}

fn default_cache_dir() -> Result<PathBuf, ProviderError> {
    Ok(home_dir()?.join(".cache/modcat"))
}
