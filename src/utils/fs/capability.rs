//! Injectable filesystem capability.
//!
//! The manifest locator and the license file finder only ever need three
//! things from the filesystem: read a file, list a directory, and ask whether
//! a path is a regular file. [`FileSystem`] captures exactly that, which lets
//! the whole collection pipeline run against an in-memory tree in tests.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single entry yielded by [`FileSystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name without any directory component
    pub file_name: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a regular file (symlinks are followed)
    pub is_file: bool,
}

/// Read-only filesystem operations used during collection.
///
/// Implementations must be shareable across the blocking thread pool, hence
/// the `Send + Sync` bound.
pub trait FileSystem: Send + Sync + fmt::Debug {
    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List a directory.
    ///
    /// Entries are returned in whatever order the underlying filesystem
    /// yields them; callers must not assume any sorting.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Whether `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by the real disk through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            // `Path::is_file` follows symlinks, matching how packages are linked in
            // node_modules by some package managers.
            let is_file = path.is_file();
            entries.push(DirEntry {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_file,
            });
        }
        Ok(entries)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
