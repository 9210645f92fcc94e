//! Build hooks: banner injection, file observation, and report generation.
//!
//! A host build drives the plugin through three hooks:
//!
//! 1. [`LicensePlugin::setup`] runs once before the build starts. It locates
//!    the self package (the manifest at or above the working directory),
//!    renders the banner and installs it into [`BuildOptions::banner`], and
//!    returns a fresh [`BuildSession`].
//! 2. [`BuildSession::on_load`] runs for every file the build loads, possibly
//!    many at once. The owning manifest is located on the blocking thread
//!    pool and recorded in the session's registry.
//! 3. [`BuildSession::on_end`] runs once after the build. It consumes the
//!    session, renders the report, and writes it.
//!
//! Dropping a session without calling `on_end` (an aborted build) writes
//! nothing.
//!
//! # Example
//!
//! ```rust,no_run
//! use oss_notice::config::Options;
//! use oss_notice::plugin::{BuildOptions, LicensePlugin};
//! use oss_notice::utils::OsFileSystem;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let plugin = LicensePlugin::new(Options::default(), Arc::new(OsFileSystem));
//! let mut build = BuildOptions::new(std::env::current_dir()?).with_outdir("dist");
//!
//! let session = plugin.setup(&mut build)?;
//! session.on_load("node_modules/lodash/lodash.js").await?;
//!
//! let outcome = session.on_end(&build).await?;
//! println!("{} dependencies -> {}", outcome.dependency_count, outcome.path.display());
//! # Ok(())
//! # }
//! ```

pub mod banner;
pub mod report;

pub use banner::{merge_banner, render_banner};
pub use report::{
    Dependency, collect_dependencies, render_dependencies, render_report, root_dependency,
    write_report,
};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{Options, ResolvedOptions};
use crate::manifest::{PackageManifest, locate, locate_from_dir};
use crate::registry::DependencyRegistry;
use crate::utils::fs::{FileSystem, resolve_output_path};

/// The slice of host build configuration the plugin reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Banner prepended to the build output; `setup` appends to it
    pub banner: Option<String>,
    /// Output directory; relative report paths are joined onto it
    pub outdir: Option<PathBuf>,
    /// Directory the build runs in
    pub working_dir: PathBuf,
}

impl BuildOptions {
    /// Options for a build running in `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = Some(outdir.into());
        self
    }

    /// Set the pre-existing banner.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }
}

/// Result of the build-end hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Resolved report path (whether or not it was written)
    pub path: PathBuf,
    /// False when the report rendered empty
    pub written: bool,
    /// Packages included in the report
    pub dependency_count: usize,
}

/// Locate the self package: the manifest at or above `working_dir`.
pub fn resolve_self(fs: &dyn FileSystem, working_dir: &Path) -> Result<Option<PackageManifest>> {
    let manifest = locate_from_dir(fs, working_dir)?;
    match &manifest {
        Some(manifest) => {
            tracing::debug!("Self package is {}@{}", manifest.name, manifest.version)
        }
        None => tracing::debug!("No self package above {}", working_dir.display()),
    }
    Ok(manifest)
}

/// The license collector, configured once and reusable across builds.
#[derive(Debug, Clone)]
pub struct LicensePlugin {
    options: ResolvedOptions,
    fs: Arc<dyn FileSystem>,
}

impl LicensePlugin {
    /// Create a plugin, filling unset options with defaults.
    pub fn new(options: Options, fs: Arc<dyn FileSystem>) -> Self {
        Self::with_resolved(options.resolve(), fs)
    }

    /// Create a plugin from already resolved options.
    pub fn with_resolved(options: ResolvedOptions, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            options,
            fs,
        }
    }

    /// Effective options.
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Build-start hook.
    ///
    /// Resolves the self package, installs the banner into `build`, and
    /// starts a session with an empty registry.
    ///
    /// # Errors
    ///
    /// Fails when the self manifest is malformed or the banner template does
    /// not render. `build` is left untouched in that case.
    pub fn setup(&self, build: &mut BuildOptions) -> Result<BuildSession> {
        let self_manifest = resolve_self(self.fs.as_ref(), &build.working_dir)?;

        let rendered = render_banner(&self.options.banner, self_manifest.as_ref())?;
        build.banner = Some(merge_banner(build.banner.as_deref(), &rendered));
        tracing::debug!("Installed banner: {}", rendered);

        Ok(BuildSession {
            options: self.options.clone(),
            fs: Arc::clone(&self.fs),
            registry: Arc::new(DependencyRegistry::new(self.options.version_ordering)),
            self_manifest,
            working_dir: build.working_dir.clone(),
        })
    }
}

/// State of one build, from `setup` to `on_end`.
#[derive(Debug)]
pub struct BuildSession {
    options: ResolvedOptions,
    fs: Arc<dyn FileSystem>,
    registry: Arc<DependencyRegistry>,
    self_manifest: Option<PackageManifest>,
    working_dir: PathBuf,
}

impl BuildSession {
    /// Observation hook for a file the build loaded.
    ///
    /// Relative paths are taken relative to the build's working directory.
    /// Files outside any package are ignored.
    ///
    /// # Errors
    ///
    /// Fails when the owning manifest is malformed.
    pub async fn on_load(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = self.working_dir.join(path.as_ref());
        tracing::debug!("Observed {}", path.display());

        let fs = Arc::clone(&self.fs);
        let registry = Arc::clone(&self.registry);
        tokio::task::spawn_blocking(move || -> Result<()> {
            if let Some(manifest) = locate(fs.as_ref(), &path)? {
                registry.record(manifest);
            }
            Ok(())
        })
        .await
        .context("Manifest lookup task failed")?
    }

    /// Packages observed so far.
    pub fn registry(&self) -> &DependencyRegistry {
        &self.registry
    }

    /// The self package, if one was found during setup.
    pub fn self_manifest(&self) -> Option<&PackageManifest> {
        self.self_manifest.as_ref()
    }

    /// Build-end hook: render and write the report.
    ///
    /// # Errors
    ///
    /// Template failures and write failures are returned unchanged; nothing
    /// is written in that case.
    pub async fn on_end(self, build: &BuildOptions) -> Result<ReportOutcome> {
        let path =
            resolve_output_path(&self.options.output_file, build.outdir.as_deref(), &self.working_dir);
        let snapshot = self.registry.snapshot();
        tracing::debug!("Build finished with {} observed packages", snapshot.len());

        let Self {
            options,
            fs,
            self_manifest,
            working_dir,
            ..
        } = self;

        tokio::task::spawn_blocking(move || -> Result<ReportOutcome> {
            let dependencies = collect_dependencies(
                snapshot,
                self_manifest.as_ref(),
                options.include_private,
                fs.as_ref(),
            );
            let root = root_dependency(self_manifest.as_ref(), &working_dir, fs.as_ref());
            let contents = render_dependencies(&dependencies, &root, &options.template)?;
            let written = write_report(&path, &contents)?;

            Ok(ReportOutcome {
                path,
                written,
                dependency_count: dependencies.len(),
            })
        })
        .await
        .context("Report task failed")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::ReportTemplate;
    use crate::test_utils::{MemoryFileSystem, PackageFixture};
    use crate::utils::fs::OsFileSystem;
    use crate::version::VersionOrdering;
    use tempfile::TempDir;

    fn memory_project() -> MemoryFileSystem {
        let mut fs = MemoryFileSystem::new();
        PackageFixture::new("root", "1.0.0").license("MIT").file("src/index.js", "").add_to(&mut fs, "/app");
        PackageFixture::new("lodash", "4.17.21")
            .license("MIT")
            .license_file("LICENSE", "lodash license")
            .file("lodash.js", "")
            .add_to(&mut fs, "/app/node_modules/lodash");
        fs
    }

    #[test]
    fn test_setup_installs_banner() {
        let plugin = LicensePlugin::new(Options::default(), Arc::new(memory_project()));
        let mut build = BuildOptions::new("/app").with_banner("// prior");

        let session = plugin.setup(&mut build).unwrap();
        assert_eq!(build.banner.as_deref(), Some("// prior\n/*! root v1.0.0 | MIT */"));
        assert_eq!(session.self_manifest().unwrap().name, "root");
        assert!(session.registry().is_empty());
    }

    #[test]
    fn test_setup_without_self_package() {
        let plugin = LicensePlugin::new(Options::default(), Arc::new(MemoryFileSystem::new()));
        let mut build = BuildOptions::new("/nowhere");

        let session = plugin.setup(&mut build).unwrap();
        assert_eq!(build.banner.as_deref(), Some("/*!  v |  */"));
        assert!(session.self_manifest().is_none());
    }

    #[test]
    fn test_setup_banner_syntax_error_leaves_build_untouched() {
        let plugin =
            LicensePlugin::new(Options::default().with_banner("{{ pkg.name "), Arc::new(memory_project()));
        let mut build = BuildOptions::new("/app").with_banner("// prior");

        assert!(plugin.setup(&mut build).is_err());
        assert_eq!(build.banner.as_deref(), Some("// prior"));
    }

    #[test]
    fn test_setup_banner_with_field_root_lacks() {
        let plugin = LicensePlugin::new(
            Options::default().with_banner("/*! {{ pkg.name }} {{ pkg.keywords }} */"),
            Arc::new(memory_project()),
        );
        let mut build = BuildOptions::new("/app");

        plugin.setup(&mut build).unwrap();
        assert_eq!(build.banner.as_deref(), Some("/*! root  */"));
    }

    #[tokio::test]
    async fn test_on_load_records_owning_package() {
        let plugin = LicensePlugin::new(Options::default(), Arc::new(memory_project()));
        let mut build = BuildOptions::new("/app");
        let session = plugin.setup(&mut build).unwrap();

        session.on_load("/app/node_modules/lodash/lodash.js").await.unwrap();
        session.on_load("src/index.js").await.unwrap();
        session.on_load("/virtual/module.js").await.unwrap();

        let names: Vec<_> = session.registry().snapshot().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["lodash", "root"]);
    }

    #[tokio::test]
    async fn test_on_load_skips_nameless_manifest() {
        let mut fs = memory_project();
        PackageFixture::unnamed("")
            .field("type", serde_json::json!("module"))
            .file("index.mjs", "")
            .add_to(&mut fs, "/app/node_modules/lodash/esm");
        let plugin = LicensePlugin::new(Options::default(), Arc::new(fs));
        let session = plugin.setup(&mut BuildOptions::new("/app")).unwrap();

        session.on_load("/app/node_modules/lodash/esm/index.mjs").await.unwrap();

        assert!(session.registry().is_empty());
    }

    #[tokio::test]
    async fn test_registry_uses_configured_ordering() {
        let mut fs = MemoryFileSystem::new();
        PackageFixture::new("dup", "9.0.0").file("a.js", "").add_to(&mut fs, "/app/node_modules/dup");
        PackageFixture::new("dup", "10.0.0").file("b.js", "").add_to(&mut fs, "/app/node_modules/x/node_modules/dup");

        let plugin = LicensePlugin::new(
            Options::default().with_version_ordering(VersionOrdering::Semver),
            Arc::new(fs),
        );
        let session = plugin.setup(&mut BuildOptions::new("/app")).unwrap();
        session.on_load("/app/node_modules/dup/a.js").await.unwrap();
        session.on_load("/app/node_modules/x/node_modules/dup/b.js").await.unwrap();

        assert_eq!(session.registry().get("dup").unwrap().version, "10.0.0");
    }

    #[tokio::test]
    async fn test_on_end_writes_default_report() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        PackageFixture::new("root", "1.0.0").file("src/index.js", "").write_to(root).unwrap();
        PackageFixture::new("lodash", "4.17.21")
            .license("MIT")
            .file("lodash.js", "")
            .write_to(&root.join("node_modules/lodash"))
            .unwrap();

        let plugin = LicensePlugin::new(Options::default(), Arc::new(OsFileSystem));
        let mut build = BuildOptions::new(root).with_outdir("dist");
        let session = plugin.setup(&mut build).unwrap();
        session.on_load("src/index.js").await.unwrap();
        session.on_load("node_modules/lodash/lodash.js").await.unwrap();

        let outcome = session.on_end(&build).await.unwrap();
        assert!(outcome.written);
        assert_eq!(outcome.dependency_count, 1);
        assert_eq!(outcome.path, root.join("dist/dependencies.txt"));
        assert_eq!(std::fs::read_to_string(&outcome.path).unwrap(), "lodash:4.17.21 -- MIT\n");
    }

    #[tokio::test]
    async fn test_on_end_empty_function_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let plugin = LicensePlugin::new(
            Options::default().with_template(ReportTemplate::function(|_, _| Ok(String::new()))),
            Arc::new(OsFileSystem),
        );
        let mut build = BuildOptions::new(temp.path());
        let session = plugin.setup(&mut build).unwrap();

        let outcome = session.on_end(&build).await.unwrap();
        assert!(!outcome.written);
        assert!(!temp.path().join("dependencies.txt").exists());
    }

    #[tokio::test]
    async fn test_on_load_malformed_manifest_fails() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/app/node_modules/bad/package.json", "{").add_file("/app/node_modules/bad/i.js", "");

        let plugin = LicensePlugin::new(Options::default(), Arc::new(fs));
        let session = plugin.setup(&mut BuildOptions::new("/app")).unwrap();
        assert!(session.on_load("/app/node_modules/bad/i.js").await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_on_load() {
        let plugin = LicensePlugin::new(Options::default(), Arc::new(memory_project()));
        let session = Arc::new(plugin.setup(&mut BuildOptions::new("/app")).unwrap());

        let mut handles = Vec::new();
        for _ in 0..20 {
            let session = Arc::clone(&session);
            handles.push(tokio::spawn(async move {
                session.on_load("/app/node_modules/lodash/lodash.js").await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(session.registry().len(), 1);
    }
}
