//! Configuration for oss-notice
//!
//! User options mirror the shape of the options file: every leaf is optional
//! and anything left out falls back to its documented default. Resolution is
//! per leaf, so setting `third_party.output.file` alone keeps the default
//! template, and so on.
//!
//! # Modules
//!
//! - `parser` - Generic TOML parsing utilities with error context
//!
//! # Options File (`oss-notice.toml`)
//!
//! ```toml
//! banner = "/*! {{ pkg.name }} v{{ pkg.version }} */"
//!
//! [third_party]
//! include_private = false
//! version_ordering = "lexical"   # or "semver"
//!
//! [third_party.output]
//! file = "licenses/third-party.txt"
//! template = "{% for d in dependencies %}{{ d.name }}: {{ d.license }}\n{% endfor %}"
//! # or a built-in function:
//! # template = { builtin = "json" }
//! ```
//!
//! # Defaults
//!
//! | Option                         | Default                                                  |
//! |--------------------------------|----------------------------------------------------------|
//! | `banner`                       | `/*! {{ pkg.name }} v{{ pkg.version }} \| {{ pkg.license }} */` |
//! | `third_party.include_private`  | `false`                                                  |
//! | `third_party.version_ordering` | `lexical`                                                |
//! | `third_party.output.file`      | `dependencies.txt`                                       |
//! | `third_party.output.template`  | built-in `lines`: `name:version -- license` per package  |

pub mod parser;

pub use parser::parse_config;

use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::{DEFAULT_BANNER_TEMPLATE, DEFAULT_REPORT_FILE};
use crate::templating::ReportTemplate;
use crate::version::VersionOrdering;

/// User-supplied options; every leaf optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Banner template rendered against the self package
    pub banner: Option<String>,
    /// Third-party report settings
    pub third_party: Option<ThirdPartyOptions>,
}

/// `[third_party]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThirdPartyOptions {
    /// Keep packages marked `"private": true`
    pub include_private: Option<bool>,
    /// How versions of the same package are compared
    pub version_ordering: Option<VersionOrdering>,
    /// Report destination and format
    pub output: Option<OutputOptions>,
}

/// `[third_party.output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputOptions {
    /// Report path; relative paths are joined onto the build's outdir
    pub file: Option<PathBuf>,
    /// Report template
    pub template: Option<ReportTemplate>,
}

/// Options with every leaf populated.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub banner: String,
    pub include_private: bool,
    pub version_ordering: VersionOrdering,
    pub output_file: PathBuf,
    pub template: ReportTemplate,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            banner: DEFAULT_BANNER_TEMPLATE.to_string(),
            include_private: false,
            version_ordering: VersionOrdering::default(),
            output_file: PathBuf::from(DEFAULT_REPORT_FILE),
            template: ReportTemplate::default(),
        }
    }
}

impl Options {
    /// Fill every unset leaf with its default.
    ///
    /// An empty `banner` counts as unset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oss_notice::config::{Options, OutputOptions, ThirdPartyOptions};
    /// use std::path::PathBuf;
    ///
    /// let options = Options {
    ///     third_party: Some(ThirdPartyOptions {
    ///         output: Some(OutputOptions {
    ///             file: Some(PathBuf::from("NOTICE")),
    ///             ..Default::default()
    ///         }),
    ///         ..Default::default()
    ///     }),
    ///     ..Default::default()
    /// };
    ///
    /// let resolved = options.resolve();
    /// assert_eq!(resolved.output_file, PathBuf::from("NOTICE"));
    /// assert!(!resolved.include_private);
    /// ```
    #[must_use]
    pub fn resolve(self) -> ResolvedOptions {
        let defaults = ResolvedOptions::default();
        let third_party = self.third_party.unwrap_or_default();
        let output = third_party.output.unwrap_or_default();

        ResolvedOptions {
            banner: self.banner.filter(|b| !b.is_empty()).unwrap_or(defaults.banner),
            include_private: third_party.include_private.unwrap_or(defaults.include_private),
            version_ordering: third_party.version_ordering.unwrap_or(defaults.version_ordering),
            output_file: output.file.unwrap_or(defaults.output_file),
            template: output.template.unwrap_or(defaults.template),
        }
    }

    /// Set the banner template.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Set `third_party.include_private`.
    #[must_use]
    pub fn with_include_private(mut self, include_private: bool) -> Self {
        self.third_party_mut().include_private = Some(include_private);
        self
    }

    /// Set `third_party.version_ordering`.
    #[must_use]
    pub fn with_version_ordering(mut self, ordering: VersionOrdering) -> Self {
        self.third_party_mut().version_ordering = Some(ordering);
        self
    }

    /// Set `third_party.output.file`.
    #[must_use]
    pub fn with_output_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.output_mut().file = Some(file.into());
        self
    }

    /// Set `third_party.output.template`.
    #[must_use]
    pub fn with_template(mut self, template: ReportTemplate) -> Self {
        self.output_mut().template = Some(template);
        self
    }

    fn third_party_mut(&mut self) -> &mut ThirdPartyOptions {
        self.third_party.get_or_insert_with(ThirdPartyOptions::default)
    }

    fn output_mut(&mut self) -> &mut OutputOptions {
        self.third_party_mut().output.get_or_insert_with(OutputOptions::default)
    }
}
