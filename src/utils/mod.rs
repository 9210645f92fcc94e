//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Filesystem capability, atomic writes, and path helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use oss_notice::utils::{ensure_dir, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("dist"))?;
//! safe_write(Path::new("dist/dependencies.txt"), "lodash:4.17.21 -- MIT\n")?;
//! # Ok(())
//! # }
//! ```

pub mod fs;

pub use fs::{FileSystem, OsFileSystem, atomic_write, ensure_dir, normalize_path, safe_write};
