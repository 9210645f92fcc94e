//! Shared project builder for integration tests.

// Not every helper is used by every test module.
#![allow(dead_code)]

use anyhow::Result;
use oss_notice::config::Options;
use oss_notice::plugin::{BuildOptions, LicensePlugin, ReportOutcome};
use oss_notice::test_utils::PackageFixture;
use oss_notice::utils::OsFileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary project directory with a root package and `node_modules`.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    /// Empty project directory with no root manifest.
    pub fn empty() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new()?,
        })
    }

    /// Project whose root package is `name@version` with license `MIT`.
    pub fn new(name: &str, version: &str) -> Result<Self> {
        let project = Self::empty()?;
        PackageFixture::new(name, version)
            .license("MIT")
            .license_file("LICENSE", &format!("Root license for {name}"))
            .file("src/index.js", "import 'lodash';\n")
            .write_to(project.path())?;
        Ok(project)
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Install a package at `node_modules/<relative>`; returns the path of its `index.js`.
    pub fn add_module(&self, relative: &str, fixture: PackageFixture) -> Result<PathBuf> {
        let dir = self.path().join("node_modules").join(relative);
        fixture.file("index.js", "module.exports = {};\n").write_to(&dir)?;
        Ok(dir.join("index.js"))
    }

    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.path().join(relative))?)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }

    /// Run a full build over `files` with output directory `dist`.
    pub async fn build(&self, options: Options, files: &[PathBuf]) -> Result<(BuildOptions, ReportOutcome)> {
        let plugin = LicensePlugin::new(options, Arc::new(OsFileSystem));
        let mut build = BuildOptions::new(self.path()).with_outdir("dist");
        let session = plugin.setup(&mut build)?;
        for file in files {
            session.on_load(file).await?;
        }
        let outcome = session.on_end(&build).await?;
        Ok((build, outcome))
    }
}
