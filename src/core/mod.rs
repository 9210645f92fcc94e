//! Core types for oss-notice
//!
//! This module holds the error taxonomy shared by every component:
//!
//! - [`NoticeError`] - Enumerated error types covering all fatal failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Example
//!
//! ```rust
//! use oss_notice::core::{NoticeError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn write_report() -> Result<()> {
//!     Err(NoticeError::ReportWrite {
//!         path: "dist/dependencies.txt".to_string(),
//!         reason: "read-only file system".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = write_report() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, NoticeError, user_friendly_error};
