//! Banner rendering.

use anyhow::Result;

use crate::core::NoticeError;
use crate::manifest::PackageManifest;
use crate::templating::{TemplateRenderer, banner_context};

/// Name used for the banner template in error messages.
const BANNER_TEMPLATE_NAME: &str = "banner";

/// Render the banner template against the self package.
///
/// `pkg` is the self package's `package.json`. Fields it lacks render
/// empty, including ones no package defines. Without a self manifest every
/// field is empty.
///
/// # Errors
///
/// Returns [`NoticeError::TemplateRender`] when the template does not parse
/// or names a variable outside `pkg`.
///
/// # Examples
///
/// ```rust
/// use oss_notice::constants::DEFAULT_BANNER_TEMPLATE;
/// use oss_notice::manifest::PackageManifest;
/// use oss_notice::plugin::render_banner;
/// use std::path::Path;
///
/// let root = PackageManifest::from_json_str(
///     r#"{"name": "root", "version": "1.0.0", "license": "MIT"}"#,
///     Path::new("/app"),
/// ).unwrap();
///
/// assert_eq!(render_banner(DEFAULT_BANNER_TEMPLATE, Some(&root)).unwrap(), "/*! root v1.0.0 | MIT */");
/// assert_eq!(render_banner(DEFAULT_BANNER_TEMPLATE, None).unwrap(), "/*!  v |  */");
/// ```
pub fn render_banner(template: &str, self_manifest: Option<&PackageManifest>) -> Result<String> {
    let context = banner_context(self_manifest, template);
    let rendered = TemplateRenderer::new(BANNER_TEMPLATE_NAME).render(template, &context).map_err(|e| {
        tracing::debug!("{}", e.format_with_context());
        let reason = match e.location().line_number {
            Some(line) => format!("{e} (line {line})"),
            None => e.to_string(),
        };
        NoticeError::TemplateRender {
            template: BANNER_TEMPLATE_NAME.to_string(),
            reason,
        }
    })?;
    Ok(rendered)
}

/// Append the rendered banner to the banner the host already had.
///
/// A newline separates the two when the existing banner is non-empty.
#[must_use]
pub fn merge_banner(existing: Option<&str>, rendered: &str) -> String {
    match existing {
        Some(existing) if !existing.is_empty() => format!("{existing}\n{rendered}"),
        _ => rendered.to_string(),
    }
}
