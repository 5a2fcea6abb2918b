//! Loop block record
//!
//! A loop is stored as its field tuple plus the rows reshaped from the flat
//! value run. Every row has exactly `fields.len()` values, in field order.

use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;

use super::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loop {
    /// Data names in header order, duplicates kept as written
    pub fields: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    /// Byte range from the first field name to the last consumed token
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Loop {
    pub fn new(fields: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            fields,
            rows,
            span: 0..0,
        }
    }

    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = span;
        self
    }

    /// Number of fields, which is also the length of every row
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column whose data name matches `name` (ASCII case-insensitive)
    ///
    /// More than one index means the header repeats the name; picking one is
    /// left to the caller.
    pub fn field_indices(&self, name: &str) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.eq_ignore_ascii_case(name))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_duplicate_fields(&self) -> bool {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .any(|field| !seen.insert(field.to_ascii_lowercase()))
    }

    /// Values of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Rows paired with their field names
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &Value)>> + '_ {
        self.rows.iter().map(move |row| {
            self.fields
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }
}
