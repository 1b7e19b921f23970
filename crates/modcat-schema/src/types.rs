//! Newtype wrappers for string identifiers and the operating-system tag.
//!
//! All newtypes serialize/deserialize as plain strings.

use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// A release version string such as `2021.1.0f1`.
    ReleaseVersion
);

string_newtype!(
    /// Identifier of a module within one release. Dedup key when merging sources.
    ModuleId
);

/// Operating system a module listing is resolved for.
///
/// Passed explicitly through every resolution call; only size accessors and
/// provider file naming look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsTag {
    Win,
    Mac,
    Linux,
}

impl OsTag {
    /// Best guess for the host this process runs on. Unknown hosts map to `Linux`.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Win,
            "macos" => Self::Mac,
            _ => Self::Linux,
        }
    }

    /// Suffix used in legacy manifest file names.
    pub fn legacy_name(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Mac => "osx",
            Self::Linux => "linux",
        }
    }

    /// Suffix used in catalog release index names.
    pub fn catalog_name(self) -> &'static str {
        match self {
            Self::Win => "win32",
            Self::Mac => "darwin",
            Self::Linux => "linux",
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Win
    }
}

impl fmt::Display for OsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Win => "win",
            Self::Mac => "mac",
            Self::Linux => "linux",
        };
        f.write_str(s)
    }
}

impl FromStr for OsTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" | "windows" => Ok(Self::Win),
            "mac" | "osx" | "macos" | "darwin" => Ok(Self::Mac),
            "linux" => Ok(Self::Linux),
            other => Err(SchemaError::InvalidOs(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_version_display_and_as_ref() {
        let v = ReleaseVersion::new("2021.1.0f1");
        assert_eq!(v.to_string(), "2021.1.0f1");
        assert_eq!(v.as_str(), "2021.1.0f1");
        assert_eq!(AsRef::<str>::as_ref(&v), "2021.1.0f1");
    }

    #[test]
    fn module_id_serde_roundtrip() {
        let id = ModuleId::new("android");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"android\"");
        let back: ModuleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn versions_order_lexically() {
        let a = ReleaseVersion::from("2021.1.0f1");
        let b = ReleaseVersion::from("2021.2.0f1");
        assert!(a < b);
    }

    #[test]
    fn os_tag_parses_aliases() {
        assert_eq!("win".parse::<OsTag>().unwrap(), OsTag::Win);
        assert_eq!("Windows".parse::<OsTag>().unwrap(), OsTag::Win);
        assert_eq!("osx".parse::<OsTag>().unwrap(), OsTag::Mac);
        assert_eq!("darwin".parse::<OsTag>().unwrap(), OsTag::Mac);
        assert_eq!(" linux ".parse::<OsTag>().unwrap(), OsTag::Linux);
    }

    #[test]
    fn os_tag_rejects_unknown() {
        let err = "beos".parse::<OsTag>().unwrap_err();
        assert!(err.to_string().contains("beos"));
    }

    #[test]
    fn os_tag_file_suffixes() {
        assert_eq!(OsTag::Mac.legacy_name(), "osx");
        assert_eq!(OsTag::Mac.catalog_name(), "darwin");
        assert_eq!(OsTag::Win.catalog_name(), "win32");
        assert_eq!(OsTag::Linux.legacy_name(), "linux");
    }

    #[test]
    fn os_tag_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OsTag::Win).unwrap(), "\"win\"");
        assert_eq!(OsTag::Mac.to_string(), "mac");
    }
}
