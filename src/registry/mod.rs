//! Build-scoped registry of observed packages.
//!
//! Every file the build loads is mapped to its owning package and recorded
//! here. The registry keeps at most one manifest per package name. When the
//! same name shows up again, the stored manifest is replaced only if the new
//! version is strictly greater (or the stored one has no version at all), so
//! a bundle containing `lodash@4.17.20` and `lodash@4.17.21` is reported once,
//! at `4.17.21`.
//!
//! # Concurrency
//!
//! [`DependencyRegistry::record`] takes `&self` and may be called from many
//! tasks at once. The compare-and-replace runs while holding the map entry,
//! so concurrent observations of the same name cannot lose an update.
//!
//! # Example
//!
//! ```rust
//! use oss_notice::manifest::PackageManifest;
//! use oss_notice::registry::DependencyRegistry;
//! use std::path::Path;
//!
//! let registry = DependencyRegistry::default();
//! for (name, version) in [("b", "1.0.0"), ("a", "1.0.0"), ("b", "2.0.0")] {
//!     let json = format!(r#"{{"name": "{name}", "version": "{version}"}}"#);
//!     registry.record(PackageManifest::from_json_str(&json, Path::new("/x")).unwrap());
//! }
//!
//! let names: Vec<_> = registry.snapshot().into_iter().map(|(n, m)| format!("{n}@{}", m.version)).collect();
//! assert_eq!(names, ["a@1.0.0", "b@2.0.0"]);
//! ```

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::manifest::PackageManifest;
use crate::version::VersionOrdering;

/// What [`DependencyRegistry::record`] did with a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First time this name was seen
    Inserted,
    /// Replaced a lower (or missing) version
    Replaced {
        /// Version that was stored before
        previous: String,
    },
    /// Stored version is the same or newer
    Kept,
    /// Manifest has no name and was not recorded
    Ignored,
}

/// Concurrent name → manifest map with "keep the newest version" merging.
#[derive(Debug, Default)]
pub struct DependencyRegistry {
    entries: DashMap<String, PackageManifest>,
    ordering: VersionOrdering,
}

impl DependencyRegistry {
    /// Create an empty registry comparing versions with `ordering`.
    #[must_use]
    pub fn new(ordering: VersionOrdering) -> Self {
        Self {
            entries: DashMap::new(),
            ordering,
        }
    }

    /// Record an observed manifest.
    ///
    /// Manifests without a name are ignored.
    pub fn record(&self, manifest: PackageManifest) -> RecordOutcome {
        if manifest.name.is_empty() {
            tracing::debug!("Ignoring unnamed package at {}", manifest.directory.display());
            return RecordOutcome::Ignored;
        }

        match self.entries.entry(manifest.name.clone()) {
            Entry::Vacant(entry) => {
                tracing::debug!("Registered {}@{}", manifest.name, manifest.version);
                entry.insert(manifest);
                RecordOutcome::Inserted
            }
            Entry::Occupied(mut entry) => {
                let stored = entry.get();
                if stored.version.is_empty() || self.ordering.is_newer(&manifest.version, &stored.version) {
                    let previous = stored.version.clone();
                    tracing::debug!(
                        "Replacing {}@{} with {} ({} ordering)",
                        manifest.name,
                        previous,
                        manifest.version,
                        self.ordering
                    );
                    entry.insert(manifest);
                    RecordOutcome::Replaced {
                        previous,
                    }
                } else {
                    tracing::trace!(
                        "Keeping {}@{} over {}",
                        manifest.name,
                        stored.version,
                        manifest.version
                    );
                    RecordOutcome::Kept
                }
            }
        }
    }

    /// All recorded `(name, manifest)` pairs, sorted ascending by name.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, PackageManifest)> {
        let mut snapshot: Vec<_> =
            self.entries.iter().map(|entry| (entry.key().clone(), entry.value().clone())).collect();
        snapshot.sort_by(|(a, _), (b, _)| a.cmp(b));
        snapshot
    }

    /// Stored manifest for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PackageManifest> {
        self.entries.get(name).map(|entry| entry.value().clone())
    }

    /// Number of distinct package names recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The version ordering in use.
    #[must_use]
    pub fn ordering(&self) -> VersionOrdering {
        self.ordering
    }
}
