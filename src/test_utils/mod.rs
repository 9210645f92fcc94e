//! Test utilities for oss-notice
//!
//! This module provides utilities for writing tests, including an in-memory
//! filesystem, package fixtures, and once-only log initialization.
//!
//! # Test Isolation
//!
//! The utilities in this module help ensure tests don't interfere with each other:
//! - [`MemoryFileSystem`] keeps whole `node_modules` trees in memory
//! - [`PackageFixture`] writes manifests and license files either to memory or disk
//! - [`init_test_logging`] installs a test-writer subscriber exactly once
//!
//! # Example
//!
//! ```rust,no_run
//! use oss_notice::license::find_license_text;
//! use oss_notice::test_utils::{MemoryFileSystem, PackageFixture};
//! use std::path::Path;
//!
//! let mut fs = MemoryFileSystem::new();
//! PackageFixture::new("lodash", "4.17.21")
//!     .license("MIT")
//!     .license_file("LICENSE", "MIT License")
//!     .add_to(&mut fs, "/app/node_modules/lodash");
//!
//! assert_eq!(find_license_text(&fs, Path::new("/app/node_modules/lodash")), "MIT License");
//! ```

pub mod fixtures;
pub mod memory_fs;

pub use fixtures::PackageFixture;
pub use memory_fs::MemoryFileSystem;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// This function initializes the tracing subscriber for tests, but only once
/// regardless of how many times it's called. It respects the `RUST_LOG` environment
/// variable if set, or uses the provided log level.
///
/// # Arguments
///
/// * `level` - Optional log level to use. If None, uses `RUST_LOG` environment variable
///
/// # Example
///
/// ```rust,no_run
/// use tracing::Level;
///
/// fn my_test() {
///     // Use environment variable
///     oss_notice::test_utils::init_test_logging(None);
///
///     // Or set level programmatically
///     oss_notice::test_utils::init_test_logging(Some(Level::DEBUG));
/// }
/// ```
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=oss_notice=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            // No logging if neither is provided
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
