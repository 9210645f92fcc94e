//! Structured template errors
//!
//! This module provides structured error types for template rendering with
//! line context and variable suggestions, plus user-friendly formatting.

/// Template rendering errors with context
#[derive(Debug)]
pub enum TemplateError {
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Location information for template errors
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Which template failed (`banner`, `third_party.output.template`, ...)
    pub template_name: String,
    /// Line number if available from Tera
    pub line_number: Option<usize>,
    /// Source lines around the error, 1-indexed
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                suggestions,
                ..
            } => {
                write!(f, "Template variable not found: '{}'", variable)?;
                if let Some(best) = suggestions.first() {
                    write!(f, " (did you mean '{}'?)", best)?;
                }
                Ok(())
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => {
                write!(f, "Template syntax error: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    /// Location of the failure
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            } => location,
        }
    }

    /// Generate user-friendly error message with context and suggestions
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                suggestions,
                location,
            } => format_variable_not_found_error(
                variable,
                available_variables,
                suggestions,
                location,
            ),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_syntax_error(message, location),
        }
    }
}

/// Format a detailed "variable not found" error message
fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {}\n", variable));
    msg.push_str(&format!("Template: {}\n", location.template_name));
    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push('\n');

    push_context_lines(&mut msg, location);

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
        msg.push('\n');
    }

    if !available_variables.is_empty() {
        msg.push_str("Available variables in this context:\n");

        // Group by prefix
        let mut grouped = std::collections::BTreeMap::new();
        for var in available_variables {
            let prefix = var.split('.').next().unwrap_or(var);
            grouped.entry(prefix).or_insert_with(Vec::new).push(var.clone());
        }

        for (prefix, vars) in &grouped {
            if vars.len() <= 3 {
                for var in vars {
                    msg.push_str(&format!("  {}\n", var));
                }
            } else {
                msg.push_str(&format!("  {}.*  ({} variables)\n", prefix, vars.len()));
            }
        }
        msg.push('\n');
    }

    msg
}

/// Format syntax error
fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    msg.push_str(&format!("Template: {}\n", location.template_name));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push('\n');

    push_context_lines(&mut msg, location);

    msg.push_str("SUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
    msg.push_str("  - Invalid filter names\n");
    msg.push_str("  - Missing quotes around string values\n\n");

    msg
}

fn push_context_lines(msg: &mut String, location: &ErrorLocation) {
    let Some(lines) = &location.context_lines else {
        return;
    };
    for (number, line) in lines {
        let marker = if Some(*number) == location.line_number {
            ">"
        } else {
            " "
        };
        msg.push_str(&format!("{} {:>4} | {}\n", marker, number, line));
    }
    msg.push('\n');
}
