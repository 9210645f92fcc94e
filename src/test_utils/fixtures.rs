//! Test fixtures for creating sample packages
//!
//! A [`PackageFixture`] describes one package directory: its `package.json`
//! and, optionally, a license file. It can be materialized into a
//! [`MemoryFileSystem`] or onto disk.

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};

use super::MemoryFileSystem;
use crate::constants::MANIFEST_FILE_NAME;

/// Builder for a package directory.
#[derive(Clone, Debug)]
pub struct PackageFixture {
    pub manifest: Map<String, Value>,
    pub license_file: Option<(String, String)>,
    pub extra_files: Vec<(String, String)>,
}

impl PackageFixture {
    /// Package with a name and version
    pub fn new(name: &str, version: &str) -> Self {
        let mut manifest = Map::new();
        manifest.insert("name".to_string(), json!(name));
        manifest.insert("version".to_string(), json!(version));
        Self {
            manifest,
            license_file: None,
            extra_files: Vec::new(),
        }
    }

    /// Package whose manifest declares no name
    pub fn unnamed(version: &str) -> Self {
        let mut fixture = Self::new("", version);
        fixture.manifest.remove("name");
        fixture
    }

    /// Set the `license` field
    pub fn license(self, license: &str) -> Self {
        self.field("license", json!(license))
    }

    /// Mark the package private
    pub fn private(self) -> Self {
        self.field("private", json!(true))
    }

    /// Set an arbitrary manifest field
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.manifest.insert(key.to_string(), value);
        self
    }

    /// Ship a license file next to the manifest
    pub fn license_file(mut self, file_name: &str, text: &str) -> Self {
        self.license_file = Some((file_name.to_string(), text.to_string()));
        self
    }

    /// Ship an arbitrary file (relative to the package directory)
    pub fn file(mut self, relative: &str, content: &str) -> Self {
        self.extra_files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Serialized `package.json` content
    pub fn manifest_json(&self) -> String {
        serde_json::to_string_pretty(&Value::Object(self.manifest.clone()))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Materialize into an in-memory filesystem
    pub fn add_to(&self, fs: &mut MemoryFileSystem, dir: impl AsRef<Path>) {
        let dir = dir.as_ref();
        fs.add_file(dir.join(MANIFEST_FILE_NAME), self.manifest_json());
        if let Some((name, text)) = &self.license_file {
            fs.add_file(dir.join(name), text.clone());
        }
        for (relative, content) in &self.extra_files {
            fs.add_file(dir.join(relative), content.clone());
        }
    }

    /// Write to disk, returning the manifest path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create package dir {}", dir.display()))?;

        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        fs::write(&manifest_path, self.manifest_json())
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

        if let Some((name, text)) = &self.license_file {
            fs::write(dir.join(name), text)?;
        }
        for (relative, content) in &self.extra_files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        Ok(manifest_path)
    }
}
