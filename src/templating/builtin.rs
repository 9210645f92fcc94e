//! Built-in report template functions.
//!
//! - `lines`: one `name:version -- license` line per dependency
//! - `json`: a pretty-printed JSON array of
//!   `{ name, version, licenseText, author?, license?, repository? }`
//!
//! Both render an empty list to the empty string, so a build with no
//! third-party packages writes no report.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::{ReportTemplate, TemplateFn};
use crate::plugin::Dependency;

/// Names of the built-in report functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinTemplate {
    /// `name:version -- license` lines
    #[default]
    Lines,
    /// JSON array with license texts
    Json,
}

impl BuiltinTemplate {
    /// Render `dependencies` with this function.
    ///
    /// # Errors
    ///
    /// Only the JSON variant can fail, on serialization.
    pub fn render(self, dependencies: &[Dependency], _root: &Dependency) -> Result<String> {
        match self {
            Self::Lines => Ok(render_lines(dependencies)),
            Self::Json => render_json(dependencies),
        }
    }

    /// The function as a [`TemplateFn`].
    pub fn as_fn(self) -> TemplateFn {
        Arc::new(move |dependencies: &[Dependency], root: &Dependency| self.render(dependencies, root))
    }
}

impl From<BuiltinTemplate> for ReportTemplate {
    fn from(builtin: BuiltinTemplate) -> Self {
        ReportTemplate::Function(builtin.as_fn())
    }
}

impl fmt::Display for BuiltinTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines => write!(f, "lines"),
            Self::Json => write!(f, "json"),
        }
    }
}

fn render_lines(dependencies: &[Dependency]) -> String {
    let mut out = String::new();
    for dependency in dependencies {
        let manifest = &dependency.manifest;
        out.push_str(&format!(
            "{}:{} -- {}\n",
            manifest.name,
            manifest.version,
            manifest.license.as_deref().unwrap_or_default()
        ));
    }
    out
}

/// One entry of the `json` report.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry<'a> {
    name: &'a str,
    version: &'a str,
    license_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
}

fn render_json(dependencies: &[Dependency]) -> Result<String> {
    if dependencies.is_empty() {
        return Ok(String::new());
    }

    let entries: Vec<JsonEntry<'_>> = dependencies
        .iter()
        .map(|dependency| {
            let manifest = &dependency.manifest;
            JsonEntry {
                name: &manifest.name,
                version: &manifest.version,
                license_text: &dependency.license_text,
                author: manifest.author_description(),
                license: manifest.license.as_deref(),
                repository: manifest.repository_url.as_deref(),
            }
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}
