//! File system utilities
//!
//! This module groups everything the collector needs from the filesystem:
//!
//! - **Capability**: the [`FileSystem`] trait through which manifests and
//!   license files are read, so components can run against real disk
//!   ([`OsFileSystem`]) or an in-memory fake in tests
//! - **Atomic writes**: the report is written with a temp-and-rename strategy
//! - **Paths**: logical normalization and output path resolution
//!
//! # Examples
//!
//! ```rust,no_run
//! use oss_notice::utils::fs::{FileSystem, OsFileSystem, resolve_output_path};
//! use std::path::Path;
//!
//! # fn example() -> std::io::Result<()> {
//! let fs = OsFileSystem;
//! for entry in fs.read_dir(Path::new("node_modules/lodash"))? {
//!     println!("{}", entry.file_name);
//! }
//!
//! let out = resolve_output_path(Path::new("dependencies.txt"), Some(Path::new("dist")), Path::new("."));
//! assert_eq!(out, Path::new("dist/dependencies.txt"));
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod atomic;
pub mod capability;
pub mod dirs;
pub mod paths;

// Filesystem capability
pub use capability::{DirEntry, FileSystem, OsFileSystem};

// Directory operations
pub use dirs::{ensure_dir, ensure_parent_dir};

// Atomic write operations
pub use atomic::{atomic_write, safe_write};

// Path utilities
pub use paths::{normalize_path, resolve_output_path};
