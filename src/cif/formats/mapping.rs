//! Mapping view of loops
//!
//! Renders every loop as a single-entry mapping from its field tuple to its
//! row tuples, one loop per line:
//!
//! ```text
//! {('_a', '_b', '_c'): [('1', '2', '3'), ('4', '5', '6')]}
//! {('_a', '_b'): [('1', '2'), ('3', '4'), ('5', '6')]}
//! ```
//!
//! Tag-value pairs are not shown.

use crate::cif::ast::{Document, Loop};

use super::registry::{FormatError, Formatter};

pub struct MappingFormatter;

impl Formatter for MappingFormatter {
    fn name(&self) -> &str {
        "mapping"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }

    fn description(&self) -> &str {
        "Each loop as {(fields): [(row), ...]}"
    }
}

pub fn serialize_document(doc: &Document) -> String {
    doc.loops()
        .into_iter()
        .map(|lp| format!("{}\n", serialize_loop(lp)))
        .collect()
}

pub fn serialize_loop(lp: &Loop) -> String {
    let rows: Vec<String> = lp
        .rows
        .iter()
        .map(|row| tuple(row.iter().map(|value| value.as_str())))
        .collect();
    format!(
        "{{{}: [{}]}}",
        tuple(lp.fields.iter().map(String::as_str)),
        rows.join(", ")
    )
}

/// A parenthesised tuple; a single element keeps its trailing comma
fn tuple<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<String> = items.map(quote).collect();
    match items.len() {
        1 => format!("({},)", items[0]),
        _ => format!("({})", items.join(", ")),
    }
}

fn quote(text: &str) -> String {
    if text.contains('\'') && !text.contains('"') {
        format!("\"{}\"", text.replace('\\', "\\\\"))
    } else {
        format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}
