//! Template context building for banners and reports.
//!
//! Manifests are flattened into plain-string views before they reach Tera so
//! that every normalized field is always present. Absent optional fields
//! become empty strings, which render as nothing and test false in
//! `{% if %}`.
//!
//! The banner is more lenient than the report: `pkg` carries the whole
//! `package.json`, and any `pkg.<field>` the template mentions but the
//! manifest lacks is bound to `""`.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tera::Context as TeraContext;

use crate::manifest::PackageManifest;
use crate::plugin::Dependency;

/// Context key holding the self package in banner templates.
pub const BANNER_PACKAGE_KEY: &str = "pkg";
/// Context key holding the ordered dependency list in report templates.
pub const REPORT_DEPENDENCIES_KEY: &str = "dependencies";
/// Context key holding the self package in report templates.
pub const REPORT_ROOT_KEY: &str = "root";

/// Template-facing view of a [`PackageManifest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageView {
    pub name: String,
    pub version: String,
    pub license: String,
    /// `name <email> (url)`
    pub author: String,
    pub repository: String,
    pub description: String,
    pub homepage: String,
    pub private: bool,
    pub directory: String,
}

impl From<&PackageManifest> for PackageView {
    fn from(manifest: &PackageManifest) -> Self {
        Self {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            license: manifest.license.clone().unwrap_or_default(),
            author: manifest.author_description().unwrap_or_default(),
            repository: manifest.repository_url.clone().unwrap_or_default(),
            description: manifest.description.clone().unwrap_or_default(),
            homepage: manifest.homepage.clone().unwrap_or_default(),
            private: manifest.private,
            directory: manifest.directory.display().to_string(),
        }
    }
}

/// Template-facing view of a [`Dependency`]: the package fields plus
/// `license_text`.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyView {
    #[serde(flatten)]
    pub package: PackageView,
    pub license_text: String,
}

impl From<&Dependency> for DependencyView {
    fn from(dependency: &Dependency) -> Self {
        Self {
            package: PackageView::from(&dependency.manifest),
            license_text: dependency.license_text.clone(),
        }
    }
}

/// Context for the banner template: a single `pkg` object.
///
/// `pkg` holds every top-level field of the self package's `package.json`
/// with the normalized [`PackageView`] fields laid over them. Paths under
/// `pkg` that `template` names and that are still missing are filled with
/// `""`. Without a self manifest every `pkg` field is empty.
pub fn banner_context(self_manifest: Option<&PackageManifest>, template: &str) -> TeraContext {
    let mut pkg = self_manifest.map(|manifest| manifest.fields.clone()).unwrap_or_default();
    let view = self_manifest.map(PackageView::from).unwrap_or_default();
    if let Ok(Value::Object(normalized)) = serde_json::to_value(&view) {
        pkg.extend(normalized);
    }

    for path in referenced_paths(template, BANNER_PACKAGE_KEY) {
        fill_missing(&mut pkg, &path);
    }

    let mut context = TeraContext::new();
    context.insert(BANNER_PACKAGE_KEY, &Value::Object(pkg));
    context
}

/// Dotted paths below `root` that appear in `template`, without the root.
///
/// `{{ pkg.repository.url }}` yields `["repository", "url"]`.
fn referenced_paths(template: &str, root: &str) -> Vec<Vec<String>> {
    let pattern = format!(r"\b{}((?:\.[A-Za-z_][A-Za-z0-9_]*)+)", regex::escape(root));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    re.captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().split('.').skip(1).map(str::to_string).collect())
        .collect()
}

/// Bind `path` to `""` unless something already lives there.
///
/// Missing intermediate segments become objects; an existing non-object
/// value on the way is left alone.
fn fill_missing(map: &mut Map<String, Value>, path: &[String]) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.entry(first.clone()).or_insert_with(|| Value::String(String::new()));
        return;
    }
    if let Value::Object(child) = map.entry(first.clone()).or_insert_with(|| Value::Object(Map::new())) {
        fill_missing(child, rest);
    }
}

/// Context for a string report template.
///
/// `dependencies` is the whole filtered, ordered list; `root` is the self
/// package with its own license text.
pub fn report_context(dependencies: &[Dependency], root: &Dependency) -> TeraContext {
    let views: Vec<DependencyView> = dependencies.iter().map(DependencyView::from).collect();
    let mut context = TeraContext::new();
    context.insert(REPORT_DEPENDENCIES_KEY, &views);
    context.insert(REPORT_ROOT_KEY, &DependencyView::from(root));
    context
}
