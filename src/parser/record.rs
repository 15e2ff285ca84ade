//! Parsed line representation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One parsed configuration line.
///
/// A record is either a section header (`listen web 0.0.0.0:80`) or a key
/// inside a section (`server s1 10.0.0.1:80 check`); the distinction is made
/// by the store, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    /// First token of the line.
    name: String,

    /// Every token after the name, in line order.
    values: Vec<String>,

    /// Pairs derived from the tail of `values`.
    keywords: BTreeMap<String, String>,

    /// Text after the comment delimiter, untrimmed.
    #[serde(skip_serializing_if = "String::is_empty")]
    comment: String,
}

impl Record {
    /// Create an empty record carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(
        name: String,
        values: Vec<String>,
        keywords: BTreeMap<String, String>,
        comment: String,
    ) -> Self {
        Self {
            name,
            values,
            keywords,
            comment,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn keywords(&self) -> &BTreeMap<String, String> {
        &self.keywords
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Look up a derived keyword value, e.g. `inter` on a `server` line.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.keywords.get(key).map(String::as_str)
    }

    /// Positional value lookup; index 0 is the first token after the name.
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Append positional values.
    pub fn push_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(Into::into));
    }

    /// Set a keyword entry, replacing any previous value.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.keywords.insert(key.into(), value.into());
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for value in &self.values {
            write!(f, " {}", value)?;
        }
        if !self.comment.is_empty() {
            write!(f, " #{}", self.comment)?;
        }
        Ok(())
    }
}
