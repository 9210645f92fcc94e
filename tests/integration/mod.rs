//! Integration test suite for oss-notice
//!
//! End-to-end tests that drive the build hooks against real package trees on
//! disk, and the `oss-notice` binary through `assert_cmd`.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **common**: Project builder shared by the other modules
//! - **plugin_flow**: setup / on_load / on_end against a `node_modules` tree
//! - **templates**: String templates, function templates, builtins
//! - **cli**: The `report` and `banner` subcommands

mod common;

mod cli;
mod plugin_flow;
mod templates;
