//! TokenTrackTUI core library.
//!
//! Holds the configuration subsystem (typed schema, TOML persistence and
//! provider list management) and the dashboard snapshot model that the
//! `tokentracktui` binary prints.

pub mod config;
pub mod dashboard;

/// Crate version, shown by the CLI and the dashboard header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Release codename.
pub const CODENAME: &str = "Neural Nexus";
