use crate::ProviderError;
use modcat_schema::{OsTag, ReleaseVersion};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory layout of the local manifest cache.
///
/// Legacy manifests live under `legacy/`, one file per version and OS; catalog
/// indexes live under `catalog/`, one file per OS.
#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn legacy_dir(&self) -> PathBuf {
        self.root.join("legacy")
    }

    #[inline]
    pub fn catalog_dir(&self) -> PathBuf {
        self.root.join("catalog")
    }

    /// File name of a legacy manifest, both locally and relative to the
    /// version's base URL.
    pub fn legacy_file_name(version: &ReleaseVersion, os: OsTag) -> String {
        format!("release-{version}-{}.ini", os.legacy_name())
    }

    pub fn catalog_file_name(os: OsTag) -> String {
        format!("releases-{}.json", os.catalog_name())
    }

    #[inline]
    pub fn legacy_path(&self, version: &ReleaseVersion, os: OsTag) -> PathBuf {
        self.legacy_dir().join(Self::legacy_file_name(version, os))
    }

    #[inline]
    pub fn catalog_path(&self, os: OsTag) -> PathBuf {
        self.catalog_dir().join(Self::catalog_file_name(os))
    }

    /// Atomically replace `path` with `data`. Parent directories are created.
    pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), ProviderError> {
        let dir = path
            .parent()
            .ok_or_else(|| ProviderError::Config(format!("no parent for {}", path.display())))?;
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| ProviderError::Io(e.error))?;
        Ok(())
    }
}

/// A cache file counts as present only when it exists and is non-empty.
pub(crate) fn is_cached(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}
