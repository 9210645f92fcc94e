//! Version ordering used when one package name is observed at several versions.
//!
//! # Strategies
//!
//! - [`VersionOrdering::Lexical`] (default) compares the raw strings. This is
//!   cheap and deterministic but not semantic: `"10.0.0"` sorts *below*
//!   `"9.0.0"`.
//! - [`VersionOrdering::Semver`] parses both sides as semantic versions and
//!   falls back to lexical comparison when either side does not parse.
//!
//! # Examples
//!
//! ```rust
//! use oss_notice::version::VersionOrdering;
//!
//! assert!(!VersionOrdering::Lexical.is_newer("10.0.0", "9.0.0"));
//! assert!(VersionOrdering::Semver.is_newer("10.0.0", "9.0.0"));
//!
//! // Unparseable versions fall back to string comparison
//! assert!(VersionOrdering::Semver.is_newer("b", "a"));
//! ```

use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How two version strings of the same package are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    /// Plain string comparison
    #[default]
    Lexical,
    /// Semantic version precedence, lexical when unparseable
    Semver,
}

impl VersionOrdering {
    /// Compare `a` against `b`.
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexical => a.cmp(b),
            Self::Semver => match (parse_version(a), parse_version(b)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => a.cmp(b),
            },
        }
    }

    /// Whether `candidate` is strictly greater than `current`.
    #[must_use]
    pub fn is_newer(self, candidate: &str, current: &str) -> bool {
        self.compare(candidate, current) == Ordering::Greater
    }
}

impl fmt::Display for VersionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Semver => write!(f, "semver"),
        }
    }
}

impl FromStr for VersionOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lexical" => Ok(Self::Lexical),
            "semver" => Ok(Self::Semver),
            other => Err(format!("unknown version ordering '{other}' (expected 'lexical' or 'semver')")),
        }
    }
}

/// Parse a version, tolerating a leading `v`.
fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let clean = version.strip_prefix('v').unwrap_or(version);
    Version::parse(clean).ok()
}
