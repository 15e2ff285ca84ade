//! Line parsing subsystem.
//!
//! # Data Flow
//! ```text
//! raw line
//!     → line.rs (comment split, whitespace tokenization, tail pairing)
//!     → Record (name, values, keywords, comment)
//!     → handed to the store for classification
//! ```
//!
//! # Design Decisions
//! - Parsing is a pure function of one line; no state crosses lines
//! - Malformed input never errors: a line either yields a record or is blank
//! - The keyword map is a heuristic over the token tail, not a grammar

pub mod line;
pub mod record;

pub use line::parse_line;
pub use record::Record;
