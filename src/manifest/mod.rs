//! Package manifest model and normalization.
//!
//! Every file observed during a build is owned by the package whose
//! `package.json` is nearest above it. This module turns such a manifest into
//! a [`PackageManifest`]: a small, normalized record carrying only the fields
//! the license report needs.
//!
//! # Normalization
//!
//! Raw manifests in the wild are inconsistent, so parsing is lenient and
//! fills required-but-missing fields with empty defaults:
//!
//! | Field        | Accepted input                                   | Normalized to                         |
//! |--------------|--------------------------------------------------|---------------------------------------|
//! | `name`       | string                                           | trimmed string, `""` when absent      |
//! | `version`    | string or number                                 | trimmed, leading `=`/`v` removed      |
//! | `license`    | string, `{ "type": .. }`, legacy `licenses` list | SPDX-ish string                       |
//! | `author`     | `"Name <email> (url)"` or object                 | [`Person`]                            |
//! | `repository` | URL, `user/repo`, `github:user/repo`, object     | full URL                              |
//! | `private`    | boolean                                          | `bool`, non-booleans are `false`      |
//!
//! # Example
//!
//! ```rust
//! use oss_notice::manifest::PackageManifest;
//! use std::path::Path;
//!
//! let json = r#"{
//!     "name": "lodash",
//!     "version": "v4.17.21",
//!     "license": "MIT",
//!     "author": "John-David Dalton <john.david.dalton@gmail.com>",
//!     "repository": "lodash/lodash"
//! }"#;
//!
//! let manifest = PackageManifest::from_json_str(json, Path::new("/app/node_modules/lodash")).unwrap();
//! assert_eq!(manifest.version, "4.17.21");
//! assert_eq!(manifest.author.unwrap().email.as_deref(), Some("john.david.dalton@gmail.com"));
//! assert_eq!(manifest.repository_url.as_deref(), Some("git+https://github.com/lodash/lodash.git"));
//! ```

pub mod locator;
pub mod person;
pub mod repository;

pub use locator::{find_manifest_from, load_manifest, locate, locate_from_dir};
pub use person::Person;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Normalized package description.
///
/// `directory` always points at the directory containing the manifest file
/// that produced this value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    /// Package name, empty when the manifest declares none
    pub name: String,
    /// Package version, compared as a plain string by default
    pub version: String,
    /// License expression
    pub license: Option<String>,
    /// Package author
    pub author: Option<Person>,
    /// Normalized repository URL
    pub repository_url: Option<String>,
    /// Private packages are left out of the report unless explicitly included
    pub private: bool,
    /// Short package description
    pub description: Option<String>,
    /// Project homepage
    pub homepage: Option<String>,
    /// Directory containing the manifest
    pub directory: PathBuf,
    /// Every top-level field of `package.json`, as written
    #[serde(skip)]
    pub fields: Map<String, Value>,
}

/// Raw manifest shape. Every field is kept as a JSON value so that odd but
/// legal manifests (numeric versions, object licenses) normalize instead of
/// failing.
#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    name: Option<Value>,
    version: Option<Value>,
    license: Option<Value>,
    licenses: Option<Value>,
    author: Option<Value>,
    repository: Option<Value>,
    private: Option<Value>,
    description: Option<Value>,
    homepage: Option<Value>,
}

impl PackageManifest {
    /// Parse and normalize manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when `content` is not a JSON object.
    pub fn from_json_str(content: &str, directory: &Path) -> Result<Self, serde_json::Error> {
        let Value::Object(fields) = serde_json::from_str::<Value>(content)? else {
            return Err(serde::de::Error::custom("package manifest is not a JSON object"));
        };
        let raw = RawManifest::deserialize(&Value::Object(fields.clone()))?;
        Ok(Self {
            fields,
            ..Self::normalize(raw, directory)
        })
    }

    /// A manifest with every field empty, rooted at `directory`.
    ///
    /// Stands in for the self package when the build's working directory has
    /// no manifest above it.
    #[must_use]
    pub fn anonymous(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            ..Self::default()
        }
    }

    /// Author rendered as `name <email> (url)`, if any.
    #[must_use]
    pub fn author_description(&self) -> Option<String> {
        self.author.as_ref().map(Person::description)
    }

    fn normalize(raw: RawManifest, directory: &Path) -> Self {
        let license = raw
            .license
            .as_ref()
            .and_then(license_from_value)
            .or_else(|| raw.licenses.as_ref().and_then(legacy_licenses));

        Self {
            name: string_value(raw.name.as_ref()).unwrap_or_default(),
            version: string_value(raw.version.as_ref()).map(|v| clean_version(&v)).unwrap_or_default(),
            license,
            author: raw.author.as_ref().and_then(Person::from_value),
            repository_url: raw.repository.as_ref().and_then(repository::from_value),
            private: matches!(raw.private, Some(Value::Bool(true))),
            description: string_value(raw.description.as_ref()),
            homepage: string_value(raw.homepage.as_ref()),
            directory: directory.to_path_buf(),
            fields: Map::new(),
        }
    }
}

/// Trimmed string for string or number values; empty strings become `None`.
fn string_value(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() { None } else { Some(s) }
}

/// Strip the loose prefixes (`=`, `v`) that `npm version` tolerates.
fn clean_version(version: &str) -> String {
    version.trim().trim_start_matches('=').trim_start_matches(['v', 'V']).trim().to_string()
}

fn license_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => string_value(map.get("type")),
        _ => None,
    }
}

/// Legacy `"licenses": [{ "type": "MIT" }, { "type": "Apache-2.0" }]`.
fn legacy_licenses(value: &Value) -> Option<String> {
    let types: Vec<String> = value.as_array()?.iter().filter_map(license_from_value).collect();
    match types.len() {
        0 => None,
        1 => types.into_iter().next(),
        _ => Some(format!("({})", types.join(" OR "))),
    }
}
