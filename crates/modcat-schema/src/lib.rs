//! Module descriptors and manifest records for modcat.
//!
//! This crate defines the data layer: the normalized `ModuleDescriptor` with its
//! OS-aware size accessors, raw records of the legacy INI manifests
//! (`LegacyManifest`) and of the catalog service index (`CatalogIndex`), and the
//! `SourceMap` that ties each release version to its download base URL.

pub mod catalog;
pub mod descriptor;
pub mod legacy;
pub mod sources;
pub mod types;

pub use catalog::{CatalogIndex, CatalogRecord, CatalogRelease};
pub use descriptor::{size_in_bytes, ModuleDescriptor};
pub use legacy::{parse_legacy_file, parse_legacy_manifest, LegacyManifest, LegacyRecord};
pub use sources::SourceMap;
pub use types::{ModuleId, OsTag, ReleaseVersion};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("unknown operating system '{0}', expected win, mac or linux")]
    InvalidOs(String),
}
