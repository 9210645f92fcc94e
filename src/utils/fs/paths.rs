//! Path utilities for normalization and output path resolution.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components.
///
/// This is a logical operation: the filesystem is not consulted and symbolic
/// links are not resolved.
///
/// # Examples
///
/// ```rust
/// use oss_notice::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// let path = Path::new("/foo/./bar/../baz");
/// assert_eq!(normalize_path(path), PathBuf::from("/foo/baz"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {} // Skip .
            Component::ParentDir => {
                components.pop(); // Remove previous component for ..
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Resolves the report output path.
///
/// Absolute paths are returned unchanged. Relative paths are joined onto the
/// build's output directory when one is declared, otherwise onto
/// `working_dir`. A relative `outdir` is itself resolved against
/// `working_dir`.
///
/// # Examples
///
/// ```rust
/// use oss_notice::utils::fs::resolve_output_path;
/// use std::path::Path;
///
/// let cwd = Path::new("/project");
/// assert_eq!(
///     resolve_output_path(Path::new("deps.txt"), Some(Path::new("dist")), cwd),
///     Path::new("/project/dist/deps.txt"),
/// );
/// assert_eq!(
///     resolve_output_path(Path::new("deps.txt"), None, cwd),
///     Path::new("/project/deps.txt"),
/// );
/// assert_eq!(
///     resolve_output_path(Path::new("/tmp/deps.txt"), Some(Path::new("dist")), cwd),
///     Path::new("/tmp/deps.txt"),
/// );
/// ```
#[must_use]
pub fn resolve_output_path(file: &Path, outdir: Option<&Path>, working_dir: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }

    let base = match outdir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => working_dir.join(dir),
        None => working_dir.to_path_buf(),
    };

    normalize_path(&base.join(file))
}
