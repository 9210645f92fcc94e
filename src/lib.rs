//! oss-notice - third-party license notices for JavaScript builds
//!
//! oss-notice hooks into a bundler-style build and does two things with the
//! license metadata of the packages that end up in the output:
//!
//! - prepends a banner for the package being built (the *self* package)
//! - writes a third-party report listing every other package whose files the
//!   build loaded, together with each package's license text
//!
//! # Architecture Overview
//!
//! Every file the build loads is mapped to its owning package by walking up
//! the directory tree to the nearest `package.json`. Observed packages are
//! recorded by name in a concurrent registry; when the same name shows up in
//! several versions, the greatest version wins. At build end the registry is
//! filtered (the self package and, by default, private packages are dropped),
//! each package's license file is read, and the list is rendered through a
//! template into the report file.
//!
//! # Core Modules
//!
//! - [`plugin`] - The build hooks: setup, per-file observation, build end
//! - [`manifest`] - `package.json` parsing and the upward manifest search
//! - [`license`] - License file discovery inside a package directory
//! - [`registry`] - Name-keyed store of observed packages
//! - [`templating`] - Tera rendering for the banner and the report
//! - [`version`] - Version ordering used to deduplicate packages
//!
//! ## Supporting Modules
//! - [`cli`] - Standalone host for builds without a plugin system
//! - [`config`] - Plugin options and the `oss-notice.toml` file
//! - [`core`] - Error types and user-facing error formatting
//! - [`utils`] - Filesystem capability, atomic writes, path helpers
//!
//! # Options File (oss-notice.toml)
//!
//! ```toml
//! banner = "/*! {{ pkg.name }} v{{ pkg.version }} | {{ pkg.license }} */"
//!
//! [third_party]
//! include_private = false
//! version_ordering = "semver"
//!
//! [third_party.output]
//! file = "THIRD_PARTY_NOTICES.txt"
//! template = """
//! {% for dep in dependencies %}{{ dep.name }}@{{ dep.version }} ({{ dep.license }})
//! {{ dep.license_text }}
//! {% endfor %}"""
//! ```
//!
//! # Library Usage
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
//! for file in ["src/index.js", "node_modules/react/index.js"] {
//!     session.on_load(file).await?;
//! }
//! session.on_end(&build).await?;
//! # Ok(())
//! # }
//! ```

// Build hooks
pub mod plugin;

// Package metadata
pub mod license;
pub mod manifest;
pub mod registry;
pub mod version;

// Rendering
pub mod templating;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod utils;

// Test utilities (only available in tests or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
