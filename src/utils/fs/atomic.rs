//! Atomic file write operations using temp-and-rename strategy.
//!
//! The third-party report is overwritten on every build; writing through a
//! temporary sibling file means a reader never observes a half-written report.

use crate::utils::fs::dirs::ensure_parent_dir;
use anyhow::{Context, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// Safely writes a string to a file using atomic operations.
///
/// This is a convenience wrapper around [`atomic_write`] that writes the
/// string's UTF-8 bytes.
///
/// # Examples
///
/// ```rust,no_run
/// use oss_notice::utils::fs::safe_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// safe_write(Path::new("dist/dependencies.txt"), "lodash:4.17.21 -- MIT")?;
/// # Ok(())
/// # }
/// ```
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Writes content to a uniquely named temporary file next to the target
/// 2. Syncs the temporary file to disk
/// 3. Renames the temporary file over the target path
///
/// Parent directories are created when missing. An existing file at `path`
/// is replaced. The temporary file is removed if any step fails, and two
/// writers targeting the same path never share a temporary file.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).with_context(|| {
        format!(
            "Failed to create temp file in: {}\n\nCheck file permissions and that directory exists",
            dir.display()
        )
    })?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", temp.path().display()))?;

    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
