//! Nearest-manifest discovery.
//!
//! Given a file the build loaded, walk upward from its directory until a
//! `package.json` is found. Not finding one is a normal outcome (files outside
//! any package, virtual modules) and is reported as `Ok(None)`.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::PackageManifest;
use crate::constants::MANIFEST_FILE_NAME;
use crate::core::NoticeError;
use crate::utils::fs::FileSystem;

/// Find the nearest manifest by searching up from `start`.
///
/// # Algorithm
///
/// 1. Check for `package.json` in the current directory
/// 2. If found, return its full path
/// 3. If not found, move to the parent directory
/// 4. Repeat until found or the filesystem root is reached
#[must_use]
pub fn find_manifest_from(fs: &dyn FileSystem, start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let manifest_path = current.join(MANIFEST_FILE_NAME);
        if fs.is_file(&manifest_path) {
            return Some(manifest_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Read and normalize the manifest at `manifest_path`.
///
/// # Errors
///
/// Returns [`NoticeError::ManifestParse`] when the file cannot be read or is
/// not a JSON object.
pub fn load_manifest(fs: &dyn FileSystem, manifest_path: &Path) -> Result<PackageManifest> {
    let parse_error = |reason: String| NoticeError::ManifestParse {
        file: manifest_path.display().to_string(),
        reason,
    };

    let content = fs.read_to_string(manifest_path).map_err(|e| parse_error(e.to_string()))?;
    let directory = manifest_path.parent().unwrap_or(Path::new("."));

    let manifest = PackageManifest::from_json_str(&content, directory)
        .map_err(|e| parse_error(e.to_string()))?;
    Ok(manifest)
}

/// Locate the manifest owning `file_path`.
///
/// The search starts in the file's parent directory. When `file_path` is
/// itself a directory the search starts there instead.
///
/// # Examples
///
/// ```rust,no_run
/// use oss_notice::manifest::locate;
/// use oss_notice::utils::OsFileSystem;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// if let Some(manifest) = locate(&OsFileSystem, Path::new("node_modules/lodash/lodash.js"))? {
///     println!("{} {}", manifest.name, manifest.version);
/// }
/// # Ok(())
/// # }
/// ```
pub fn locate(fs: &dyn FileSystem, file_path: &Path) -> Result<Option<PackageManifest>> {
    let start = if fs.is_dir(file_path) {
        file_path
    } else {
        file_path.parent().unwrap_or(Path::new(""))
    };
    locate_from_dir(fs, start)
}

/// Locate the nearest manifest at or above `dir`.
pub fn locate_from_dir(fs: &dyn FileSystem, dir: &Path) -> Result<Option<PackageManifest>> {
    match find_manifest_from(fs, dir) {
        Some(manifest_path) => {
            tracing::trace!("Found manifest {} for {}", manifest_path.display(), dir.display());
            load_manifest(fs, &manifest_path).map(Some)
        }
        None => {
            tracing::trace!("No manifest at or above {}", dir.display());
            Ok(None)
        }
    }
}
