//! Generic configuration parsing utilities.
//!
//! TOML parsing with file path context in every error, used for
//! `oss-notice.toml` options files.
//!
//! Example error output:
//! ```text
//! Failed to parse config file: /path/to/oss-notice.toml
//! Caused by:
//!     invalid type: integer `3`, expected a string or a `{ builtin = ... }` table
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use oss_notice::config::{Options, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let options: Options = parse_config(Path::new("oss-notice.toml"))?;
/// println!("banner override: {:?}", options.banner);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - "Failed to read config file: <path>" when the file cannot be read
/// - "Failed to parse config file: <path>" when the TOML is invalid or does
///   not match `T`
///
/// The underlying error is preserved as the cause.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!("Loaded config file {}", path.display());
    Ok(config)
}
