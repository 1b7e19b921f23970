use crate::merge::merge_modules;
use crate::CoreError;
use modcat_remote::{CatalogManifestProvider, LegacyManifestProvider, ProviderError};
use modcat_schema::{ModuleDescriptor, OsTag, ReleaseVersion, SourceMap};
use std::collections::BTreeMap;
use tracing::debug;

/// Merged module lists keyed by release version.
pub type ModulesByVersion = BTreeMap<ReleaseVersion, Vec<ModuleDescriptor>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub os: OsTag,
    pub offline: bool,
}

impl ResolveOptions {
    pub fn new(os: OsTag, offline: bool) -> Self {
        Self { os, offline }
    }
}

/// One version or a batch of versions to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelection {
    Single(ReleaseVersion),
    Many(Vec<ReleaseVersion>),
}

impl From<ReleaseVersion> for VersionSelection {
    fn from(version: ReleaseVersion) -> Self {
        Self::Single(version)
    }
}

impl From<&str> for VersionSelection {
    fn from(version: &str) -> Self {
        Self::Single(ReleaseVersion::from(version))
    }
}

impl From<Vec<ReleaseVersion>> for VersionSelection {
    fn from(versions: Vec<ReleaseVersion>) -> Self {
        Self::Many(versions)
    }
}

/// Resolves the installable modules of release versions by merging the
/// legacy and catalog manifest sources.
///
/// Legacy modules come first and win on id collisions. The resolver holds no
/// state of its own; every call goes to the providers.
pub struct ModuleCatalogResolver<'a> {
    legacy: &'a dyn LegacyManifestProvider,
    catalog: &'a dyn CatalogManifestProvider,
}

impl<'a> ModuleCatalogResolver<'a> {
    pub fn new(
        legacy: &'a dyn LegacyManifestProvider,
        catalog: &'a dyn CatalogManifestProvider,
    ) -> Self {
        Self { legacy, catalog }
    }

    /// Resolve one version or a batch, always returning a per-version map.
    pub fn load_modules(
        &self,
        selection: &VersionSelection,
        sources: &SourceMap,
        options: ResolveOptions,
    ) -> Result<ModulesByVersion, CoreError> {
        match selection {
            VersionSelection::Single(version) => {
                debug!("loading modules for version {version}");
                let modules = self.resolve_for_version(version, sources, options)?;
                Ok(BTreeMap::from([(version.clone(), modules)]))
            }
            VersionSelection::Many(versions) => {
                debug!("loading modules for several versions: {versions:?}");
                self.resolve_for_versions(versions, sources, options)
            }
        }
    }

    /// Resolve the merged module list of a single version.
    pub fn resolve_for_version(
        &self,
        version: &ReleaseVersion,
        sources: &SourceMap,
        options: ResolveOptions,
    ) -> Result<Vec<ModuleDescriptor>, CoreError> {
        let legacy = self.legacy_modules(version, sources, options)?;
        let catalog = self.catalog_modules(version, options.os, options.offline)?;
        Ok(merge_modules(legacy, catalog))
    }

    /// Resolve several versions with a single catalog refresh.
    ///
    /// The catalog is refreshed once up front (unless offline) and every
    /// version then reads the refreshed local state. Results are the same as
    /// calling [`resolve_for_version`](Self::resolve_for_version) per version.
    pub fn resolve_for_versions(
        &self,
        versions: &[ReleaseVersion],
        sources: &SourceMap,
        options: ResolveOptions,
    ) -> Result<ModulesByVersion, CoreError> {
        let mut unique: Vec<&ReleaseVersion> = Vec::with_capacity(versions.len());
        for version in versions {
            if !unique.contains(&version) {
                unique.push(version);
            }
        }

        let mut legacy_by_version = BTreeMap::new();
        for version in &unique {
            let modules = self.legacy_modules(version, sources, options)?;
            legacy_by_version.insert((*version).clone(), modules);
        }

        let Some(first) = unique.first() else {
            return Ok(ModulesByVersion::new());
        };

        if !options.offline {
            debug!("refreshing catalog once for {} version(s)", unique.len());
            // Same error kind as a refresh failing inside a single-version load.
            self.catalog.refresh(options.os).map_err(|e| {
                if e.is_unavailable() {
                    e
                } else {
                    ProviderError::unavailable(first, e)
                }
            })?;
        }

        let mut catalog_by_version = BTreeMap::new();
        for version in &unique {
            let modules = self.catalog_modules(version, options.os, true)?;
            catalog_by_version.insert((*version).clone(), modules);
        }

        let mut merged = ModulesByVersion::new();
        for (version, legacy) in legacy_by_version {
            let catalog = catalog_by_version.remove(&version).unwrap_or_default();
            merged.insert(version, merge_modules(legacy, catalog));
        }
        merged.extend(catalog_by_version);
        Ok(merged)
    }

    fn legacy_modules(
        &self,
        version: &ReleaseVersion,
        sources: &SourceMap,
        options: ResolveOptions,
    ) -> Result<Vec<ModuleDescriptor>, CoreError> {
        let manifest = self
            .legacy
            .load(version, sources, options.os, options.offline)?;
        let base_url = sources.base_url(version);
        if base_url.is_none() && manifest.iter().any(|(_, record)| record.has_relative_url()) {
            return Err(CoreError::UnknownVersion(version.to_string()));
        }
        Ok(manifest
            .iter()
            .map(|(key, record)| ModuleDescriptor::from_legacy_record(key, record, base_url))
            .collect())
    }

    fn catalog_modules(
        &self,
        version: &ReleaseVersion,
        os: OsTag,
        offline: bool,
    ) -> Result<Vec<ModuleDescriptor>, CoreError> {
        let records = self.catalog.load(version, os, offline)?;
        Ok(records
            .iter()
            .map(ModuleDescriptor::from_catalog_record)
            .collect())
    }
}
