use crate::catalog::CatalogRecord;
use crate::legacy::LegacyRecord;
use crate::types::{ModuleId, OsTag};
use serde::Serialize;

/// A single installable module of a release, normalized from either manifest source.
///
/// Sizes are stored exactly as the source reported them. Use
/// [`download_size_bytes`](Self::download_size_bytes) and
/// [`installed_size_bytes`](Self::installed_size_bytes) to read them in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    id: ModuleId,
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    installed_size: Option<u64>,
    download_size: Option<u64>,
    checksum: Option<String>,
}

impl ModuleDescriptor {
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            url: None,
            installed_size: None,
            download_size: None,
            checksum: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    #[must_use]
    pub fn with_sizes(mut self, download_size: Option<u64>, installed_size: Option<u64>) -> Self {
        self.download_size = download_size;
        self.installed_size = installed_size;
        self
    }

    #[must_use]
    pub fn with_checksum(mut self, checksum: Option<String>) -> Self {
        self.checksum = checksum;
        self
    }

    /// Build a descriptor from a legacy manifest section.
    ///
    /// The id is the lowercased section key. A url that does not start with
    /// `http` is relative to `base_url` and gets prefixed with it; without a
    /// base URL such a url is left absent.
    pub fn from_legacy_record(key: &str, record: &LegacyRecord, base_url: Option<&str>) -> Self {
        let url = match (record.url.as_deref(), base_url) {
            (Some(url), _) if !record.has_relative_url() => Some(url.to_owned()),
            (Some(url), Some(base_url)) => Some(format!("{base_url}{url}")),
            _ => None,
        };

        Self::new(key.to_lowercase())
            .with_name(record.title.clone())
            .with_description(record.description.clone())
            .with_url(url)
            .with_sizes(record.size, record.installedsize)
            .with_checksum(record.md5.clone())
    }

    /// Build a descriptor from a catalog record, field for field.
    pub fn from_catalog_record(record: &CatalogRecord) -> Self {
        Self::new(record.id.clone().unwrap_or_default())
            .with_name(record.name.clone())
            .with_description(record.description.clone())
            .with_url(record.download_url.clone())
            .with_sizes(record.download_size, record.installed_size)
            .with_checksum(record.checksum.clone())
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Download size as reported by the source.
    pub fn download_size(&self) -> Option<u64> {
        self.download_size
    }

    /// Installed size as reported by the source.
    pub fn installed_size(&self) -> Option<u64> {
        self.installed_size
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn download_size_bytes(&self, os: OsTag) -> Option<u64> {
        self.download_size.map(|size| size_in_bytes(size, os))
    }

    pub fn installed_size_bytes(&self, os: OsTag) -> Option<u64> {
        self.installed_size.map(|size| size_in_bytes(size, os))
    }
}

/// Convert a manifest size to bytes. Windows listings report kilobytes,
/// every other platform reports bytes.
pub fn size_in_bytes(raw_size: u64, os: OsTag) -> u64 {
    if os.is_windows() {
        raw_size.saturating_mul(1024)
    } else {
        raw_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(url: Option<&str>) -> LegacyRecord {
        LegacyRecord {
            url: url.map(str::to_owned),
            title: Some("Android Build Support".to_owned()),
            description: Some("Build for Android".to_owned()),
            size: Some(500),
            installedsize: Some(2000),
            md5: Some("abc".to_owned()),
        }
    }

    #[test]
    fn legacy_relative_url_is_prefixed() {
        let m = ModuleDescriptor::from_legacy_record(
            "Android",
            &legacy(Some("foo/bar.pkg")),
            Some("https://host/base/"),
        );
        assert_eq!(m.url(), Some("https://host/base/foo/bar.pkg"));
    }

    #[test]
    fn legacy_absolute_url_is_kept() {
        let m = ModuleDescriptor::from_legacy_record(
            "Android",
            &legacy(Some("http://other/x.pkg")),
            Some("https://host/base/"),
        );
        assert_eq!(m.url(), Some("http://other/x.pkg"));
    }

    #[test]
    fn legacy_without_base_url_keeps_absolute_and_drops_relative() {
        let absolute = ModuleDescriptor::from_legacy_record(
            "iOS",
            &legacy(Some("https://cdn/ios.pkg")),
            None,
        );
        assert_eq!(absolute.url(), Some("https://cdn/ios.pkg"));

        let relative =
            ModuleDescriptor::from_legacy_record("Android", &legacy(Some("a.pkg")), None);
        assert!(relative.url().is_none());
        assert_eq!(relative.name(), Some("Android Build Support"));
    }

    #[test]
    fn legacy_maps_fields_and_lowercases_id() {
        let m =
            ModuleDescriptor::from_legacy_record("Android", &legacy(Some("a.pkg")), Some("b/"));
        assert_eq!(m.id().as_str(), "android");
        assert_eq!(m.name(), Some("Android Build Support"));
        assert_eq!(m.description(), Some("Build for Android"));
        assert_eq!(m.download_size(), Some(500));
        assert_eq!(m.installed_size(), Some(2000));
        assert_eq!(m.checksum(), Some("abc"));
    }

    #[test]
    fn legacy_missing_fields_do_not_fail() {
        let m =
            ModuleDescriptor::from_legacy_record("Empty", &LegacyRecord::default(), Some("b/"));
        assert_eq!(m.id().as_str(), "empty");
        assert!(m.url().is_none());
        assert!(m.name().is_none());
        assert!(m.download_size_bytes(OsTag::Win).is_none());
    }

    #[test]
    fn catalog_maps_fields_directly() {
        let record = CatalogRecord {
            id: Some("Android".to_owned()),
            name: Some("Android".to_owned()),
            description: None,
            download_url: Some("relative.pkg".to_owned()),
            download_size: Some(1),
            installed_size: Some(2),
            checksum: Some("c".to_owned()),
        };
        let m = ModuleDescriptor::from_catalog_record(&record);
        assert_eq!(m.id().as_str(), "Android");
        assert_eq!(m.url(), Some("relative.pkg"));
        assert_eq!(m.download_size(), Some(1));
        assert_eq!(m.installed_size(), Some(2));
        assert_eq!(m.checksum(), Some("c"));
        assert!(m.description().is_none());
    }

    #[test]
    fn sizes_are_kilobytes_on_windows() {
        let m = ModuleDescriptor::new("android").with_sizes(Some(500), Some(2000));
        assert_eq!(m.download_size_bytes(OsTag::Win), Some(512_000));
        assert_eq!(m.installed_size_bytes(OsTag::Win), Some(2_048_000));
        assert_eq!(m.download_size(), Some(500));
    }

    #[test]
    fn sizes_are_bytes_elsewhere() {
        let m = ModuleDescriptor::new("android").with_sizes(Some(500), Some(2000));
        assert_eq!(m.download_size_bytes(OsTag::Mac), Some(500));
        assert_eq!(m.installed_size_bytes(OsTag::Linux), Some(2000));
    }

    #[test]
    fn size_conversion_saturates() {
        assert_eq!(size_in_bytes(u64::MAX, OsTag::Win), u64::MAX);
    }

    #[test]
    fn serializes_camel_case() {
        let m = ModuleDescriptor::new("android").with_sizes(Some(1), Some(2));
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["id"], "android");
        assert_eq!(json["downloadSize"], 1);
        assert_eq!(json["installedSize"], 2);
    }
}
