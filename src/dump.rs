//! Rendering of a loaded model for humans and machines.
//!
//! Text output lists each section instance header followed by its keys,
//! indented with a tab. Keys within an instance are grouped by name.

use std::fmt::Write;

use crate::parser::Record;
use crate::store::{KeyTable, Model};

/// Render every section instance as text.
pub fn render_text(model: &Model) -> String {
    let mut out = String::new();
    for (_, header, keys) in model.instances() {
        out.push_str(&render_instance(header, keys));
    }
    out
}

/// Render one section instance: the header line, then each key line.
pub fn render_instance(header: &Record, keys: &KeyTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header);
    for (_, records) in keys.iter() {
        for record in records {
            let _ = writeln!(out, "\t{}", record);
        }
    }
    out
}

/// Render the whole model as pretty JSON.
pub fn render_json(model: &Model) -> serde_json::Result<String> {
    serde_json::to_string_pretty(model)
}
