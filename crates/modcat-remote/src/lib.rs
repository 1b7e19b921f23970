//! Manifest providers for modcat.
//!
//! This crate fetches the two manifest sources a release's modules are listed
//! in: the per-version legacy INI manifests (relative to each version's base
//! URL) and the catalog service's per-OS release index. Both are cached on disk
//! so that offline resolution can reuse previously downloaded data.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod http;
pub mod legacy;

pub use cache::CacheLayout;
pub use catalog::HttpCatalogProvider;
pub use config::ProviderConfig;
pub use http::HttpFetcher;
pub use legacy::HttpLegacyProvider;

use modcat_schema::{CatalogRecord, LegacyManifest, OsTag, ReleaseVersion, SourceMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("manifest unavailable for version {version}: {reason}")]
    ManifestUnavailable { version: String, reason: String },
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("schema error: {0}")]
    Schema(#[from] modcat_schema::SchemaError),
    #[error("provider config error: {0}")]
    Config(String),
}

impl ProviderError {
    pub fn unavailable(version: &ReleaseVersion, reason: impl ToString) -> Self {
        Self::ManifestUnavailable {
            version: version.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ManifestUnavailable { .. })
    }
}

/// Source of legacy key/value manifests, one per release version.
pub trait LegacyManifestProvider: Send + Sync {
    /// Load the legacy manifest of `version`. With `offline` set no network
    /// access happens and a missing cache yields `ManifestUnavailable`.
    fn load(
        &self,
        version: &ReleaseVersion,
        sources: &SourceMap,
        os: OsTag,
        offline: bool,
    ) -> Result<LegacyManifest, ProviderError>;
}

/// Source of structured module records from the catalog service.
pub trait CatalogManifestProvider: Send + Sync {
    /// Sync the local catalog state for `os` with the service in one request,
    /// independent of how many versions are later loaded from it.
    fn refresh(&self, os: OsTag) -> Result<(), ProviderError>;

    /// Load the module records of `version`. Unless `offline` is set this may
    /// refresh first.
    fn load(
        &self,
        version: &ReleaseVersion,
        os: OsTag,
        offline: bool,
    ) -> Result<Vec<CatalogRecord>, ProviderError>;
}
