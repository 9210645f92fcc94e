//! License file lookup.
//!
//! A package's license text is taken from the first file in its directory
//! whose name contains `license` (case-insensitively): `LICENSE`,
//! `LICENSE.md`, `license.txt`, `MIT-LICENSE` all qualify. Entries are
//! examined in the order the filesystem lists them and are never sorted, so
//! packages shipping several candidates (`LICENSE` and `LICENSE-MIT`, say)
//! yield whichever the platform lists first.
//!
//! Lookup never fails. A missing or unreadable file is an empty string and a
//! warning in the log, not a broken build.

use std::path::Path;

use crate::constants::LICENSE_FILE_MARKER;
use crate::utils::fs::{DirEntry, FileSystem};

/// Read the license text shipped in `package_dir`, or `""` when there is none.
///
/// # Examples
///
/// ```rust
/// use oss_notice::license::find_license_text;
/// use oss_notice::test_utils::MemoryFileSystem;
/// use std::path::Path;
///
/// let mut fs = MemoryFileSystem::new();
/// fs.add_file("/pkg/index.js", "");
/// fs.add_file("/pkg/License.md", "ISC License");
///
/// assert_eq!(find_license_text(&fs, Path::new("/pkg")), "ISC License");
/// assert_eq!(find_license_text(&fs, Path::new("/elsewhere")), "");
/// ```
#[must_use]
pub fn find_license_text(fs: &dyn FileSystem, package_dir: &Path) -> String {
    let entries = match fs.read_dir(package_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Could not list {} for a license file: {}", package_dir.display(), e);
            return String::new();
        }
    };

    let Some(entry) = entries.iter().find(|entry| is_license_file(entry)) else {
        tracing::debug!("No license file in {}", package_dir.display());
        return String::new();
    };

    match fs.read_to_string(&entry.path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Could not read license file {}: {}", entry.path.display(), e);
            String::new()
        }
    }
}

/// Whether a directory entry looks like a license file.
fn is_license_file(entry: &DirEntry) -> bool {
    entry.is_file && entry.file_name.to_lowercase().contains(LICENSE_FILE_MARKER)
}
