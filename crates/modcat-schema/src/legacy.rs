use crate::SchemaError;
use std::fs;
use std::path::Path;

/// Raw fields of one section in a legacy key/value manifest.
///
/// Nothing is required. Missing or unparseable values stay `None` and are
/// carried through to the descriptor as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyRecord {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub size: Option<u64>,
    pub installedsize: Option<u64>,
    pub md5: Option<String>,
}

impl LegacyRecord {
    /// True when the url has to be resolved against the release's base URL.
    pub fn has_relative_url(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.starts_with("http"))
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "url" => self.url = Some(value.to_owned()),
            "title" => self.title = Some(value.to_owned()),
            "description" => self.description = Some(value.to_owned()),
            "size" => self.size = value.parse().ok(),
            "installedsize" => self.installedsize = value.parse().ok(),
            "md5" => self.md5 = Some(value.to_owned()),
            _ => {}
        }
    }
}

/// A parsed legacy manifest: module sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyManifest {
    entries: Vec<(String, LegacyRecord)>,
}

impl LegacyManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section. A key seen before updates the earlier entry in place.
    pub fn insert(&mut self, key: impl Into<String>, record: LegacyRecord) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = record;
        } else {
            self.entries.push((key, record));
        }
    }

    pub fn get(&self, key: &str) -> Option<&LegacyRecord> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LegacyRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse legacy INI text.
///
/// `[Section]` headers open a module; `key=value` lines fill it. Keys are
/// matched case-insensitively, `;` and `#` start comment lines, and anything
/// before the first header or without `=` is skipped. Section names keep
/// their original case; ids are lowercased later, during normalization.
pub fn parse_legacy_manifest(input: &str) -> LegacyManifest {
    let mut manifest = LegacyManifest::new();
    let mut current: Option<(String, LegacyRecord)> = None;

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if let Some((key, record)) = current.take() {
                manifest.insert(key, record);
            }
            let name = name.trim().to_owned();
            let record = manifest.get(&name).cloned().unwrap_or_default();
            current = Some((name, record));
            continue;
        }

        let Some((_, record)) = current.as_mut() else {
            continue;
        };
        if let Some((key, value)) = line.split_once('=') {
            record.set(&key.trim().to_lowercase(), unquote(value.trim()));
        }
    }

    if let Some((key, record)) = current {
        manifest.insert(key, record);
    }
    manifest
}

pub fn parse_legacy_file(path: impl AsRef<Path>) -> Result<LegacyManifest, SchemaError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_legacy_manifest(&content))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
; generated listing
[Unity]
title=Editor
description=The editor
url=Setup.pkg
size=1024
installedsize=4096
md5=abc123

[Android]
title=Android Build Support
url=https://cdn.example.com/Android.pkg
size=500
installedsize=2000
md5=def456

[iOS]
title="iOS Build Support"
"#;

    #[test]
    fn parses_sections_in_order() {
        let manifest = parse_legacy_manifest(SAMPLE);
        assert_eq!(manifest.keys(), vec!["Unity", "Android", "iOS"]);
    }

    #[test]
    fn parses_fields() {
        let manifest = parse_legacy_manifest(SAMPLE);
        let android = manifest.get("Android").unwrap();
        assert_eq!(android.title.as_deref(), Some("Android Build Support"));
        assert_eq!(
            android.url.as_deref(),
            Some("https://cdn.example.com/Android.pkg")
        );
        assert_eq!(android.size, Some(500));
        assert_eq!(android.installedsize, Some(2000));
        assert_eq!(android.md5.as_deref(), Some("def456"));
        assert!(android.description.is_none());
    }

    #[test]
    fn missing_fields_stay_absent() {
        let manifest = parse_legacy_manifest(SAMPLE);
        let ios = manifest.get("iOS").unwrap();
        assert_eq!(ios.title.as_deref(), Some("iOS Build Support"));
        assert!(ios.url.is_none());
        assert!(ios.size.is_none());
    }

    #[test]
    fn unparseable_size_is_absent() {
        let manifest = parse_legacy_manifest("[A]\nsize=lots\ninstalledsize=12\n");
        let a = manifest.get("A").unwrap();
        assert!(a.size.is_none());
        assert_eq!(a.installedsize, Some(12));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let manifest = parse_legacy_manifest("[A]\nURL=x.pkg\nInstalledSize=7\n");
        let a = manifest.get("A").unwrap();
        assert_eq!(a.url.as_deref(), Some("x.pkg"));
        assert_eq!(a.installedsize, Some(7));
    }

    #[test]
    fn lines_outside_sections_are_ignored() {
        let manifest = parse_legacy_manifest("url=stray\nnot a pair\n[A]\ngarbage\ntitle=T\n");
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("A").unwrap().title.as_deref(), Some("T"));
    }

    #[test]
    fn repeated_section_merges_into_first() {
        let manifest = parse_legacy_manifest("[A]\ntitle=T\n[B]\n[A]\nmd5=m\n");
        assert_eq!(manifest.keys(), vec!["A", "B"]);
        let a = manifest.get("A").unwrap();
        assert_eq!(a.title.as_deref(), Some("T"));
        assert_eq!(a.md5.as_deref(), Some("m"));
    }

    #[test]
    fn relative_url_detection() {
        let manifest =
            parse_legacy_manifest("[A]\nurl=a.pkg\n[B]\nurl=https://cdn/b.pkg\n[C]\ntitle=c\n");
        assert!(manifest.get("A").unwrap().has_relative_url());
        assert!(!manifest.get("B").unwrap().has_relative_url());
        assert!(!manifest.get("C").unwrap().has_relative_url());
    }

    #[test]
    fn empty_input_is_empty_manifest() {
        assert!(parse_legacy_manifest("").is_empty());
    }

    #[test]
    fn parses_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release.ini");
        std::fs::write(&path, SAMPLE).unwrap();
        let manifest = parse_legacy_file(&path).unwrap();
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_legacy_file(dir.path().join("nope.ini")).unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
