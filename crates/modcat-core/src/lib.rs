//! Module catalog resolution for modcat.
//!
//! This crate ties the two manifest providers together into the
//! `ModuleCatalogResolver`: legacy and catalog records are normalized into
//! `ModuleDescriptor`s and merged into one deduplicated list per release
//! version, with a single catalog refresh for batched lookups.

pub mod merge;
pub mod resolver;

pub use merge::merge_modules;
pub use resolver::{ModuleCatalogResolver, ModulesByVersion, ResolveOptions, VersionSelection};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Provider(#[from] modcat_remote::ProviderError),
    #[error("no base URL known for version {0}")]
    UnknownVersion(String),
}

impl CoreError {
    /// True when a provider could not obtain a manifest.
    pub fn is_manifest_unavailable(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_unavailable())
    }
}
