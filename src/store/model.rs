//! Indexed section/key model.
//!
//! # Structure
//! ```text
//! sections:   name → [header record per occurrence]
//! key_tables: name → [KeyTable per occurrence]      (same index, same occurrence)
//! KeyTable:   key name → [record per occurrence within that section instance]
//! ```
//!
//! # Design Decisions
//! - Sections and key tables are pushed together so their indices never drift
//! - The routing target is a `Cursor` (name + index), never a reference
//! - Ordered maps keep dumps and JSON output stable

use std::collections::BTreeMap;

use serde::Serialize;

use crate::parser::Record;
use crate::store::error::{StoreError, StoreResult};

/// Keys of one section instance, grouped by key name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyTable {
    keys: BTreeMap<String, Vec<Record>>,
}

impl KeyTable {
    /// All records for `key`, in file order.
    pub fn get(&self, key: &str) -> Option<&[Record]> {
        self.keys.get(key).map(Vec::as_slice)
    }

    /// First record for `key`, the common case for non-repeated keys.
    pub fn first(&self, key: &str) -> Option<&Record> {
        self.keys.get(key).and_then(|records| records.first())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct key names.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn push(&mut self, record: Record) {
        self.keys
            .entry(record.name().to_string())
            .or_default()
            .push(record);
    }
}

/// Position of one section instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub section: String,
    pub index: usize,
}

/// Every parsed section and key, queryable by name and instance index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    sections: BTreeMap<String, Vec<Record>>,
    key_tables: BTreeMap<String, Vec<KeyTable>>,
}

impl Model {
    /// Open a new instance of `section` headed by `record`.
    pub(crate) fn open_section(&mut self, section: &str, record: Record) -> Cursor {
        let headers = self.sections.entry(section.to_string()).or_default();
        headers.push(record);
        let index = headers.len() - 1;

        self.key_tables
            .entry(section.to_string())
            .or_default()
            .push(KeyTable::default());

        Cursor {
            section: section.to_string(),
            index,
        }
    }

    /// Append a key record to the instance at `cursor`.
    ///
    /// Cursors are only produced by `open_section` on this model, so the
    /// slot always exists.
    pub(crate) fn push_key(&mut self, cursor: &Cursor, record: Record) {
        if let Some(table) = self
            .key_tables
            .get_mut(&cursor.section)
            .and_then(|tables| tables.get_mut(cursor.index))
        {
            table.push(record);
        }
    }

    /// All section headers keyed by section name.
    pub fn sections(&self) -> &BTreeMap<String, Vec<Record>> {
        &self.sections
    }

    pub fn section(&self, name: &str) -> StoreResult<&[Record]> {
        self.sections
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| not_found(name))
    }

    pub fn section_at(&self, name: &str, index: usize) -> StoreResult<&Record> {
        let headers = self.section(name)?;
        headers.get(index).ok_or_else(|| StoreError::IndexOutOfRange {
            section: name.to_string(),
            index,
            len: headers.len(),
        })
    }

    pub fn key_tables(&self, name: &str) -> StoreResult<&[KeyTable]> {
        self.key_tables
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| not_found(name))
    }

    pub fn key_table_at(&self, name: &str, index: usize) -> StoreResult<&KeyTable> {
        let tables = self.key_tables(name)?;
        tables.get(index).ok_or_else(|| StoreError::IndexOutOfRange {
            section: name.to_string(),
            index,
            len: tables.len(),
        })
    }

    /// Iterate `(section name, header, keys)` for every instance.
    pub fn instances(&self) -> impl Iterator<Item = (&str, &Record, &KeyTable)> {
        self.sections.iter().flat_map(move |(name, headers)| {
            let tables = self
                .key_tables
                .get(name)
                .map(Vec::as_slice)
                .unwrap_or_default();
            headers
                .iter()
                .zip(tables)
                .map(move |(header, keys)| (name.as_str(), header, keys))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn not_found(name: &str) -> StoreError {
    StoreError::NotFound {
        section: name.to_string(),
    }
}
