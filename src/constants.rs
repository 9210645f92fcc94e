//! Global constants used throughout the oss-notice codebase.
//!
//! This module contains file names, default option values, and other
//! constants that are used across multiple modules. Defining them
//! centrally keeps the documented defaults in one discoverable place.

/// File name of the package manifest searched for by the manifest locator.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Case-insensitive substring identifying a license file inside a package directory.
pub const LICENSE_FILE_MARKER: &str = "license";

/// Default banner template.
///
/// Renders `/*! <name> v<version> | <license> */` for the self package.
pub const DEFAULT_BANNER_TEMPLATE: &str =
    "/*! {{ pkg.name }} v{{ pkg.version }} | {{ pkg.license }} */";

/// Default report file name, resolved against the build output directory.
pub const DEFAULT_REPORT_FILE: &str = "dependencies.txt";

/// Default options file consulted by the standalone host when `--options` is not given.
pub const DEFAULT_OPTIONS_FILE: &str = "oss-notice.toml";

/// Number of observed files processed concurrently by the standalone host.
pub const DEFAULT_OBSERVE_CONCURRENCY: usize = 16;
