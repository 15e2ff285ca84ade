//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! parser / store / watcher
//!     → tracing events with structured fields
//!     → logging.rs subscriber (fmt layer, EnvFilter)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - `RUST_LOG` overrides the configured level

pub mod logging;
