//! Settings validation.
//!
//! # Responsibilities
//! - Reject section names that could never match a first token
//! - Check the log level is one tracing understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::Settings;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptySectionName,
    SectionNameHasWhitespace(String),
    UnknownLogLevel(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptySectionName => write!(f, "section name cannot be empty"),
            ValidationError::SectionNameHasWhitespace(name) => {
                write!(f, "section name {:?} contains whitespace", name)
            }
            ValidationError::UnknownLogLevel(level) => write!(f, "unknown log level {:?}", level),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check `settings`, collecting every problem found.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for name in &settings.sections {
        if name.is_empty() {
            errors.push(ValidationError::EmptySectionName);
        } else if name.chars().any(char::is_whitespace) {
            errors.push(ValidationError::SectionNameHasWhitespace(name.clone()));
        }
    }

    let level = settings.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            settings.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
