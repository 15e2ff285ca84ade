//! Tool settings for the `hconf` binary.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (recognized sections, sources, log level)
//!     → ConfigStore setup in main
//!
//! On source change:
//!     watcher.rs detects modify/create
//!     → ConfigStore::reload (all-or-nothing)
//!     → ReloadEvent to the caller
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an absent settings file is valid
//! - Command-line flags are merged on top of the file by the binary
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_settings, ConfigError};
pub use schema::Settings;
pub use watcher::{ReloadEvent, SourceWatcher};
