//! Error handling for oss-notice
//!
//! This module provides the error types and user-friendly error reporting for
//! the license collector. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`NoticeError`] - Enumerated error types for every fatal failure mode
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Taxonomy
//!
//! Not every unusual situation is an error. The collector distinguishes:
//! - **Absence**: no manifest above a file, no license file in a package, an
//!   empty render result. These are modelled as `None` / empty strings and never
//!   reach this module.
//! - **Local, swallowed**: failures listing a package directory while looking for
//!   a license file. These are logged at `warn` level and degrade to "no license
//!   text".
//! - **Fatal, surfaced**: malformed manifests, template failures (syntax errors
//!   and user template functions returning `Err`), and report write failures.
//!   These are the variants of [`NoticeError`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use oss_notice::core::{NoticeError, ErrorContext, user_friendly_error};
//!
//! let error = NoticeError::ReportWrite {
//!     path: "dist/dependencies.txt".to_string(),
//!     reason: "permission denied".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for oss-notice operations.
///
/// Each variant carries the file path or template name involved so the
/// message shown to the user points at the thing that needs fixing.
#[derive(Error, Debug, Clone)]
pub enum NoticeError {
    /// A `package.json` was found but could not be read or parsed
    #[error("Invalid package manifest {file}: {reason}")]
    ManifestParse {
        /// Path of the manifest file
        file: String,
        /// Underlying read or JSON error
        reason: String,
    },

    /// A string template failed to parse or render
    #[error("Failed to render {template} template: {reason}")]
    TemplateRender {
        /// Which template failed ("banner" or "report")
        template: String,
        /// Rendering failure description
        reason: String,
    },

    /// A user-supplied report template function returned an error
    #[error("Report template function failed: {reason}")]
    TemplateFunction {
        /// Error message returned by the function
        reason: String,
    },

    /// The rendered report could not be written
    #[error("Failed to write report to {path}: {reason}")]
    ReportWrite {
        /// Resolved output path
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// Options file or option value is invalid
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the invalid configuration
        message: String,
    },

    /// A filesystem operation failed outside of report writing
    #[error("File system error: {operation}")]
    FileSystemError {
        /// Operation that failed
        operation: String,
        /// Path involved
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper carrying a user-facing suggestion and optional details.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: NoticeError,
    /// Actionable suggestion shown in green
    pub suggestion: Option<String>,
    /// Additional explanation shown in yellow
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: NoticeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`NoticeError`] variants anywhere in the error chain, then falls
/// back to [`std::io::Error`] and [`toml::de::Error`], and finally formats the
/// full cause chain for anything else.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(notice_error) = cause.downcast_ref::<NoticeError>() {
            return create_error_context(notice_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(NoticeError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the output directory")
                .with_details("This error occurs when oss-notice doesn't have permission to read or write files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(NoticeError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(NoticeError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your options file. Verify quotes, brackets, and table names");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(NoticeError::Other {
        message,
    })
}

/// Map each [`NoticeError`] variant to an [`ErrorContext`] with tailored suggestions.
fn create_error_context(error: NoticeError) -> ErrorContext {
    match &error {
        NoticeError::ManifestParse {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the JSON syntax of the package.json shown above, or reinstall the package that ships it")
            .with_details("Every package.json owning a bundled file must be valid JSON"),

        NoticeError::TemplateRender {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Check template syntax: variables use {{ var }}, control flow uses {% %}. \
                 Banner templates see `pkg`; report templates see `dependencies` and `root`",
            )
            .with_details(
                "Template errors occur when Tera cannot render the template. Common issues:\n\
                 - Undefined variables (use {% if var is defined %} to check)\n\
                 - Unclosed {{ or {% delimiters\n\
                 - Invalid filters",
            ),

        NoticeError::TemplateFunction {
            ..
        } => ErrorContext::new(error)
            .with_details("The custom report template function returned an error; no report was written"),

        NoticeError::ReportWrite {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the output path is valid and the output directory is writable"),

        NoticeError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Review the options file; see `oss-notice --help` for the accepted keys"),

        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NoticeError::ManifestParse {
            file: "/pkg/package.json".to_string(),
            reason: "expected value at line 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid package manifest /pkg/package.json: expected value at line 1"
        );

        let err = NoticeError::TemplateRender {
            template: "banner".to_string(),
            reason: "unexpected end".to_string(),
        };
        assert!(err.to_string().contains("banner template"));
    }

    #[test]
    fn test_user_friendly_error_keeps_variant_through_context() {
        let err = anyhow::Error::from(NoticeError::ManifestParse {
            file: "/pkg/package.json".to_string(),
            reason: "EOF".to_string(),
        })
        .context("Failed to observe /pkg/index.js");

        let ctx = user_friendly_error(err);
        match &ctx.error {
            NoticeError::ManifestParse {
                file,
                ..
            } => assert_eq!(file, "/pkg/package.json"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_user_friendly_error_finds_notice_error_in_chain() {
        let err = anyhow::Error::from(NoticeError::ReportWrite {
            path: "out/deps.txt".to_string(),
            reason: "denied".to_string(),
        })
        .context("build-end hook failed");

        let ctx = user_friendly_error(err);
        assert!(matches!(ctx.error, NoticeError::ReportWrite { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_generic_includes_chain() {
        let err = anyhow::anyhow!("root cause").context("outer");
        let ctx = user_friendly_error(err);
        let text = ctx.to_string();
        assert!(text.contains("outer"));
        assert!(text.contains("root cause"));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(NoticeError::ConfigError {
            message: "bad".to_string(),
        })
        .with_details("details here")
        .with_suggestion("do this");

        let text = ctx.to_string();
        assert!(text.contains("Configuration error: bad"));
        assert!(text.contains("Details: details here"));
        assert!(text.contains("Suggestion: do this"));
    }
}
