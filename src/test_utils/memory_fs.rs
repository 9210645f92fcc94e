//! In-memory [`FileSystem`] for deterministic tests.
//!
//! Directory listings come back in insertion order, so a test controls the
//! exact order the license finder sees entries in.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::utils::fs::{DirEntry, FileSystem};

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir,
}

/// A tree of files and directories held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: HashMap<PathBuf, Node>,
    order: Vec<PathBuf>,
    denied: HashSet<PathBuf>,
}

impl MemoryFileSystem {
    /// Create an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file, creating its parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> &mut Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.insert(path, Node::File(content.into()));
        self
    }

    /// Add a directory and all of its ancestors.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || matches!(self.nodes.get(path), Some(Node::Dir)) {
            return self;
        }
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.insert(path, Node::Dir);
        self
    }

    /// Make every read of `path` fail with `PermissionDenied`.
    ///
    /// Applies to both [`FileSystem::read_to_string`] and
    /// [`FileSystem::read_dir`]. Existence checks are unaffected.
    pub fn deny(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.denied.insert(path.as_ref().to_path_buf());
        self
    }

    fn insert(&mut self, path: &Path, node: Node) {
        if self.nodes.insert(path.to_path_buf(), node).is_none() {
            self.order.push(path.to_path_buf());
        }
    }

    fn check_access(&self, path: &Path) -> io::Result<()> {
        if self.denied.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("no such file or directory: {}", path.display()))
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.check_access(path)?;
        match self.nodes.get(path) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(Self::not_found(path)),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        self.check_access(path)?;
        match self.nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => return Err(Self::not_found(path)),
        }

        let entries = self
            .order
            .iter()
            .filter(|child| child.parent() == Some(path))
            .filter_map(|child| {
                let file_name = child.file_name()?.to_string_lossy().into_owned();
                let is_file = matches!(self.nodes.get(child), Some(Node::File(_)));
                Some(DirEntry {
                    file_name,
                    path: child.clone(),
                    is_file,
                })
            })
            .collect();
        Ok(entries)
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.nodes.get(path), Some(Node::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.get(path), Some(Node::Dir))
    }
}
