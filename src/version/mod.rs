//! Version ordering for deduplicating packages seen at several versions.
//!
//! Only *ordering* lives here. Range resolution and dependency graphs are out
//! of scope: the registry just needs to know whether a newly observed
//! version should replace the stored one.

pub mod comparison;

pub use comparison::VersionOrdering;
