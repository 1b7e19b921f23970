use crate::{ReleaseVersion, SchemaError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// One module entry as served by the catalog service.
///
/// Every field is optional; unknown fields (`visible`, `selected`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_size")]
    pub download_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_size")]
    pub installed_size: Option<u64>,
    #[serde(default)]
    pub checksum: Option<String>,
}

/// Accept integer, fractional (truncated) or numeric-string sizes. Anything
/// else reads as absent so one odd record cannot reject the whole index.
fn lenient_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let truncate = |f: f64| (f.is_finite() && f >= 0.0).then(|| f as u64);
    let size = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().and_then(truncate)),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    };
    Ok(size)
}

/// A release listed in the catalog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRelease {
    pub version: ReleaseVersion,
    #[serde(default)]
    pub modules: Vec<CatalogRecord>,
}

/// The catalog service's per-OS release index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIndex {
    #[serde(default)]
    pub official: Vec<CatalogRelease>,
    #[serde(default)]
    pub beta: Vec<CatalogRelease>,
}

impl CatalogIndex {
    pub fn from_bytes(data: &[u8]) -> Result<Self, SchemaError> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SchemaError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Module records of `version`, or an empty slice when the catalog does
    /// not list that release. Official releases shadow beta entries.
    pub fn modules_for(&self, version: &ReleaseVersion) -> &[CatalogRecord] {
        self.official
            .iter()
            .chain(self.beta.iter())
            .find(|release| release.version == *version)
            .map(|release| release.modules.as_slice())
            .unwrap_or_default()
    }

    pub fn versions(&self) -> Vec<&ReleaseVersion> {
        self.official
            .iter()
            .chain(self.beta.iter())
            .map(|release| &release.version)
            .collect()
    }
}
