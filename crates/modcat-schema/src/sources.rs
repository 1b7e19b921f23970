use crate::{ReleaseVersion, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Maps each known release version to the base URL its legacy manifest and
/// relative module paths live under.
///
/// Stored on disk as a flat JSON object: `{"2021.1.0f1": "https://host/abc123/"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceMap {
    entries: BTreeMap<ReleaseVersion, String>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let content = fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    pub fn insert(&mut self, version: impl Into<ReleaseVersion>, base_url: impl Into<String>) {
        self.entries.insert(version.into(), base_url.into());
    }

    pub fn base_url(&self, version: &ReleaseVersion) -> Option<&str> {
        self.entries.get(version).map(String::as_str)
    }

    pub fn contains(&self, version: &ReleaseVersion) -> bool {
        self.entries.contains_key(version)
    }

    pub fn versions(&self) -> impl Iterator<Item = &ReleaseVersion> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Into<ReleaseVersion>, U: Into<String>> FromIterator<(V, U)> for SourceMap {
    fn from_iter<I: IntoIterator<Item = (V, U)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (version, url) in iter {
            map.insert(version, url);
        }
        map
    }
}
