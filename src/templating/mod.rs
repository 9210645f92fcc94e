//! Templating for the banner and the third-party report.
//!
//! Templates use [Tera](https://keats.github.io/tera/) syntax. Two contexts
//! exist:
//!
//! # Banner Context
//!
//! - `pkg`: the self package (`name`, `version`, `license`, `author`,
//!   `repository`, `description`, `homepage`, `private`, `directory`)
//!
//! ```text
//! /*! {{ pkg.name }} v{{ pkg.version }} | {{ pkg.license }} */
//! ```
//!
//! # Report Context
//!
//! - `dependencies`: the filtered, name-ordered list; each item has the
//!   `pkg` fields above plus `license_text`
//! - `root`: the self package, with `license_text`
//!
//! ```text
//! {% for d in dependencies %}{{ d.name }}@{{ d.version }} ({{ d.license }})
//! {% endfor %}
//! ```
//!
//! A string template is rendered exactly once, against the whole list.
//!
//! # Function Templates
//!
//! Instead of a string, a report can be produced by a Rust function (see
//! [`ReportTemplate::Function`]). The built-in functions are listed in
//! [`BuiltinTemplate`].
//!
//! # Missing Values
//!
//! Absent manifest fields are bound as empty strings, so they render as
//! nothing. In the banner this extends to any `pkg.<field>` the template
//! names. Other names that are not part of the context (typos) are errors
//! and come with "did you mean" suggestions.

pub mod builtin;
pub mod context;
pub mod error;
pub mod renderer;

pub use builtin::BuiltinTemplate;
pub use context::{DependencyView, PackageView, banner_context, report_context};
pub use error::{ErrorLocation, TemplateError};
pub use renderer::TemplateRenderer;

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

use crate::plugin::Dependency;

/// A user-supplied report function: `(dependencies, root) -> report`.
///
/// Returning `Err` aborts report generation; the error reaches the caller of
/// the build-end hook unchanged.
pub type TemplateFn = Arc<dyn Fn(&[Dependency], &Dependency) -> anyhow::Result<String> + Send + Sync>;

/// How the third-party report is rendered.
#[derive(Clone)]
pub enum ReportTemplate {
    /// Tera template rendered once against the report context
    Text(String),
    /// Function called once with the dependency list and the self package
    Function(TemplateFn),
}

impl ReportTemplate {
    /// A Tera string template.
    pub fn text(template: impl Into<String>) -> Self {
        Self::Text(template.into())
    }

    /// A function template.
    ///
    /// ```rust
    /// use oss_notice::templating::ReportTemplate;
    ///
    /// let template = ReportTemplate::function(|deps, _root| Ok(format!("{} packages", deps.len())));
    /// assert!(matches!(template, ReportTemplate::Function(_)));
    /// ```
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Dependency], &Dependency) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }
}

impl Default for ReportTemplate {
    fn default() -> Self {
        BuiltinTemplate::default().into()
    }
}

impl fmt::Debug for ReportTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(template) => f.debug_tuple("Text").field(template).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Options-file forms: `template = "..."` or `template = { builtin = "json" }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReportTemplate {
    Text(String),
    Builtin {
        builtin: BuiltinTemplate,
    },
}

impl<'de> Deserialize<'de> for ReportTemplate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawReportTemplate::deserialize(deserializer)? {
            RawReportTemplate::Text(template) => Self::Text(template),
            RawReportTemplate::Builtin {
                builtin,
            } => builtin.into(),
        })
    }
}
