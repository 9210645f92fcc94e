//! Third-party report rendering and writing.
//!
//! At build end the registry snapshot is turned into the report:
//!
//! 1. Entries are filtered in name order: private packages (unless
//!    `include_private`), packages without a name, and the self package are
//!    dropped. Each survivor gets its license text attached.
//! 2. The list is rendered exactly once, either through a Tera string template
//!    or by calling a [`TemplateFn`](crate::templating::TemplateFn).
//! 3. A non-empty result is written to the resolved output path. An empty
//!    result writes nothing.

use anyhow::Result;
use std::path::Path;

use crate::config::ResolvedOptions;
use crate::core::NoticeError;
use crate::license::find_license_text;
use crate::manifest::PackageManifest;
use crate::templating::{ReportTemplate, TemplateRenderer, report_context};
use crate::utils::fs::{FileSystem, safe_write};

/// Name used for the report template in error messages.
const REPORT_TEMPLATE_NAME: &str = "report";

/// A package included in the report, with its license text.
///
/// The text is empty when the package ships no license file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    pub manifest: PackageManifest,
    pub license_text: String,
}

impl Dependency {
    /// Wrap a manifest, reading the license text from its directory.
    pub fn load(fs: &dyn FileSystem, manifest: PackageManifest) -> Self {
        let license_text = find_license_text(fs, &manifest.directory);
        Self {
            manifest,
            license_text,
        }
    }
}

/// Apply the inclusion rules to a name-ordered snapshot and attach license texts.
///
/// Snapshot order is preserved.
pub fn collect_dependencies(
    snapshot: Vec<(String, PackageManifest)>,
    self_manifest: Option<&PackageManifest>,
    include_private: bool,
    fs: &dyn FileSystem,
) -> Vec<Dependency> {
    let self_name = self_manifest.map(|manifest| manifest.name.as_str());

    snapshot
        .into_iter()
        .filter(|(name, manifest)| {
            if manifest.private && !include_private {
                tracing::debug!("Skipping private package {}", name);
                return false;
            }
            if name.is_empty() {
                tracing::debug!("Skipping unnamed package at {}", manifest.directory.display());
                return false;
            }
            if Some(name.as_str()) == self_name {
                tracing::debug!("Skipping self package {}", name);
                return false;
            }
            true
        })
        .map(|(_, manifest)| Dependency::load(fs, manifest))
        .collect()
}

/// The self package as handed to report templates.
///
/// Without a self manifest this is an anonymous, empty package rooted at
/// `working_dir` with no license text.
pub fn root_dependency(
    self_manifest: Option<&PackageManifest>,
    working_dir: &Path,
    fs: &dyn FileSystem,
) -> Dependency {
    match self_manifest {
        Some(manifest) => Dependency::load(fs, manifest.clone()),
        None => Dependency {
            manifest: PackageManifest::anonymous(working_dir),
            license_text: String::new(),
        },
    }
}

/// Render an already filtered list through `template`.
///
/// # Errors
///
/// - [`NoticeError::TemplateRender`] for Tera failures
/// - Whatever a function template returns, with
///   [`NoticeError::TemplateFunction`] attached as context
pub fn render_dependencies(
    dependencies: &[Dependency],
    root: &Dependency,
    template: &ReportTemplate,
) -> Result<String> {
    match template {
        ReportTemplate::Text(text) => {
            let context = report_context(dependencies, root);
            TemplateRenderer::new(REPORT_TEMPLATE_NAME).render(text, &context).map_err(|e| {
                tracing::debug!("{}", e.format_with_context());
                let reason = match e.location().line_number {
                    Some(line) => format!("{e} (line {line})"),
                    None => e.to_string(),
                };
                NoticeError::TemplateRender {
                    template: REPORT_TEMPLATE_NAME.to_string(),
                    reason,
                }
                .into()
            })
        }
        ReportTemplate::Function(function) => function(dependencies, root).map_err(|e| {
            let reason = format!("{e:#}");
            e.context(NoticeError::TemplateFunction {
                reason,
            })
        }),
    }
}

/// Filter the snapshot and render it with the configured template.
///
/// # Examples
///
/// ```rust
/// use oss_notice::config::Options;
/// use oss_notice::manifest::PackageManifest;
/// use oss_notice::plugin::render_report;
/// use oss_notice::test_utils::MemoryFileSystem;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let lodash = PackageManifest::from_json_str(
///     r#"{"name": "lodash", "version": "4.17.21", "license": "MIT"}"#,
///     Path::new("/app/node_modules/lodash"),
/// )?;
///
/// let report = render_report(
///     vec![("lodash".to_string(), lodash)],
///     None,
///     &Options::default().resolve(),
///     &MemoryFileSystem::new(),
///     Path::new("/app"),
/// )?;
/// assert_eq!(report, "lodash:4.17.21 -- MIT\n");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn render_report(
    snapshot: Vec<(String, PackageManifest)>,
    self_manifest: Option<&PackageManifest>,
    options: &ResolvedOptions,
    fs: &dyn FileSystem,
    working_dir: &Path,
) -> Result<String> {
    let dependencies = collect_dependencies(snapshot, self_manifest, options.include_private, fs);
    let root = root_dependency(self_manifest, working_dir, fs);
    render_dependencies(&dependencies, &root, &options.template)
}

/// Write a rendered report; returns whether anything was written.
///
/// Empty contents mean "nothing to report": no file is created and an
/// existing file is left untouched.
///
/// # Errors
///
/// Returns [`NoticeError::ReportWrite`] when the file cannot be written.
pub fn write_report(path: &Path, contents: &str) -> Result<bool> {
    if contents.is_empty() {
        tracing::debug!("Report rendered empty, not writing {}", path.display());
        return Ok(false);
    }

    safe_write(path, contents).map_err(|e| NoticeError::ReportWrite {
        path: path.display().to_string(),
        reason: format!("{e:#}"),
    })?;

    tracing::info!("Wrote third-party report to {}", path.display());
    Ok(true)
}
