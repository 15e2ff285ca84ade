//! Loader for haproxy-style sectioned configuration files.
//!
//! Lines whose first token is a recognized section name (`global`, `listen`,
//! ...) open a new section instance; every other line becomes a key of the
//! most recently opened instance.
//!
//! ```no_run
//! use hconf::ConfigStore;
//!
//! let store = ConfigStore::with_sections(["global", "defaults", "listen"]);
//! store.load_file(["/etc/haproxy/haproxy.cfg"])?;
//!
//! let keys = store.key_table_at("listen", 0)?;
//! for server in keys.get("server").unwrap_or_default() {
//!     println!("{} inter={:?}", server, server.value("inter"));
//! }
//! # Ok::<(), hconf::StoreError>(())
//! ```

pub mod config;
pub mod dump;
pub mod observability;
pub mod parser;
pub mod store;

pub use parser::{parse_line, Record};
pub use store::{ConfigStore, KeyTable, Model, StoreError, StoreResult, StoreState, DEFAULT_SECTION};
