//! Template rendering engine with Tera.
//!
//! This module provides the [`TemplateRenderer`] struct that wraps Tera with
//! structured error reporting: line context around the failure and
//! "did you mean" suggestions for misspelled variables.

use regex::Regex;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
/// This represents a 50% similarity threshold for variable name suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Number of source lines shown on each side of a failing line.
const CONTEXT_LINES: usize = 3;

/// Template renderer for banner and report templates.
///
/// Templates are user configuration, rendered once per build, so no
/// compiled-template cache is kept: each call parses its input afresh in a
/// new Tera instance.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    /// Name used in error messages (`banner`, `third_party.output.template`)
    template_name: String,
}

impl TemplateRenderer {
    /// Create a renderer whose errors are attributed to `template_name`.
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
        }
    }

    /// Render `template` against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::VariableNotFound`] when the template refers to
    /// a variable missing from the context, and [`TemplateError::SyntaxError`]
    /// for every other Tera failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oss_notice::templating::TemplateRenderer;
    /// use tera::Context;
    ///
    /// let mut context = Context::new();
    /// context.insert("name", "lodash");
    ///
    /// let renderer = TemplateRenderer::new("example");
    /// assert_eq!(renderer.render("{{ name | upper }}", &context).unwrap(), "LODASH");
    /// ```
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String, TemplateError> {
        if template.contains("<%") {
            tracing::warn!(
                "Template '{}' contains '<%' tags; only Tera syntax ({{{{ ... }}}}) is interpreted",
                self.template_name
            );
        }

        tracing::debug!("Rendering template '{}'", self.template_name);
        Self::log_context_as_kv(context);

        let mut tera = Tera::default();
        let rendered = tera
            .render_str(template, context)
            .map_err(|e| self.parse_tera_error(&e, template, context))?;

        tracing::debug!("Template '{}' rendered ({} bytes)", self.template_name, rendered.len());
        Ok(rendered)
    }

    /// Parse a Tera error into a structured [`TemplateError`]
    fn parse_tera_error(
        &self,
        error: &tera::Error,
        template_content: &str,
        context: &TeraContext,
    ) -> TemplateError {
        let line_number = Self::extract_line_from_tera_error(error);
        let context_lines = line_number
            .map(|line| Self::extract_context_lines(template_content, line, CONTEXT_LINES))
            .filter(|lines| !lines.is_empty());

        let location = Box::new(ErrorLocation {
            template_name: self.template_name.clone(),
            line_number,
            context_lines,
        });

        // Render failures wrap the interesting message in the source chain
        let variable = error_chain(error).iter().find_map(|msg| Self::extract_variable_name(msg));
        if let Some(name) = variable {
            let available_variables = Self::extract_available_variables(context);
            let suggestions = Self::find_similar_variables(&name, &available_variables);
            return TemplateError::VariableNotFound {
                variable: name,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }

        TemplateError::SyntaxError {
            message: Self::format_tera_error(error),
            location,
        }
    }

    /// Extract variable name from "Variable `foo` not found" message
    fn extract_variable_name(error_msg: &str) -> Option<String> {
        let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
        if let Some(m) = re.captures(error_msg).and_then(|caps| caps.get(1)) {
            return Some(m.as_str().to_string());
        }

        let re = Regex::new(r"Unknown variable `([^`]+)`").ok()?;
        re.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
    }

    /// Dotted paths of every object key in the context.
    ///
    /// Arrays are listed by their own path only; loop variables are not
    /// expanded.
    fn extract_available_variables(context: &TeraContext) -> Vec<String> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
            if let serde_json::Value::Object(map) = value {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    if child.is_object() {
                        walk(&path, child, out);
                    } else {
                        out.push(path);
                    }
                }
            }
        }

        let mut vars = Vec::new();
        walk("", &context.clone().into_json(), &mut vars);
        vars.sort();
        vars
    }

    /// Find similar variable names using Levenshtein distance
    fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> =
            available.iter().map(|var| (var.clone(), levenshtein(target, var))).collect();

        // Sort by distance (closest first)
        scored.sort_by_key(|(_, dist)| *dist);

        // Return top 3 suggestions within reasonable distance
        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(var, _)| var)
            .collect()
    }

    /// Extract context lines around an error location
    ///
    /// Returns up to `context_size` lines before and after the error line,
    /// along with their line numbers (1-indexed).
    fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        // Tera uses 1-indexed line numbers
        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
            .collect()
    }

    /// Extract line number from Tera error message
    ///
    /// Tera includes line:column information in parse error messages.
    /// Examples: "1:7", "15:23", "864:1"
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        let error_msg = format!("{:?}", error);

        let re = Regex::new(r"(\d+):(\d+)").ok()?;
        re.captures(&error_msg)
            .and_then(|caps| caps.get(1))
            .and_then(|line| line.as_str().parse::<usize>().ok())
    }

    /// Format a Tera error with detailed information about what went wrong.
    ///
    /// Walks the error chain and filters out unhelpful internal template names
    /// like `'__tera_one_off'`.
    pub fn format_tera_error(error: &tera::Error) -> String {
        let messages: Vec<String> = error_chain(error)
            .into_iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|cleaned| {
                !cleaned.is_empty()
                    && cleaned != "Template rendering failed"
                    && cleaned != "Template syntax error"
            })
            .collect();

        if messages.is_empty() {
            "Template syntax error (see details above)".to_string()
        } else {
            messages.join("\n  → ")
        }
    }

    /// Log the template context keys at trace level.
    fn log_context_as_kv(context: &TeraContext) {
        if let serde_json::Value::Object(map) = context.clone().into_json() {
            for (key, value) in map {
                let summary = match &value {
                    serde_json::Value::Array(items) => format!("[{} items]", items.len()),
                    serde_json::Value::Object(fields) => format!("{{{} fields}}", fields.len()),
                    other => other.to_string(),
                };
                tracing::trace!("  {}: {}", key, summary);
            }
        }
    }
}

/// Every message in the error's source chain, outermost first.
fn error_chain(error: &tera::Error) -> Vec<String> {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}
