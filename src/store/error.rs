//! Store error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by store queries and loads.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No section with this name has been opened.
    #[error("section not found: {section}")]
    NotFound { section: String },

    /// The section exists but has no instance at this index.
    #[error("index {index} out of range for section {section} ({len} instances)")]
    IndexOutOfRange {
        section: String,
        index: usize,
        len: usize,
    },

    /// A source file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::NotFound {
            section: "nope".into(),
        };
        assert_eq!(err.to_string(), "section not found: nope");

        let err = StoreError::IndexOutOfRange {
            section: "listen".into(),
            index: 99,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "index 99 out of range for section listen (2 instances)"
        );
    }

    #[test]
    fn test_read_error_keeps_source() {
        let err = StoreError::Read {
            path: PathBuf::from("/etc/haproxy/haproxy.cfg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/etc/haproxy/haproxy.cfg"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
