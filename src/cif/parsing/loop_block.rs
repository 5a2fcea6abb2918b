//! Loop block parser
//!
//! Reads one loop block from a cursor positioned just after the `loop_` marker:
//!
//! 1. Fields: data names, with comments skipped, until the first other token.
//! 2. Values: value literals, with comments skipped, until the first other
//!    token (a data name, a block marker) or the end of input.
//! 3. Reshape: the flat values are cut into consecutive rows of one value per
//!    field.
//!
//! ```text
//! loop_
//! _a _b _c      # fields
//! 1 2 3 4 5 6   # values
//! ```
//!
//! gives fields `(_a, _b, _c)` and rows `(1, 2, 3)`, `(4, 5, 6)`.
//!
//! A failed parse consumes nothing: the cursor is rewound to where it was.

use crate::cif::ast::{Loop, Value};
use crate::cif::error::{ParseError, ParseErrorKind};
use crate::cif::lexing::{Token, TokenSpan};

use super::cursor::TokenCursor;
use super::ParseOptions;

/// Parse one loop block; the caller has already consumed `loop_`
pub fn parse_loop(
    cursor: &mut TokenCursor<'_>,
    options: &ParseOptions,
) -> Result<Loop, ParseError> {
    let entry = cursor.index();
    let result = read_loop(cursor, options);
    if let Err(err) = &result {
        tracing::debug!(%err, token_index = entry, "loop parse failed");
        cursor.rewind(entry);
    }
    result
}

/// Parse one loop block from the start of `tokens`
///
/// Returns the loop and the index of the first token after it.
pub fn parse_loop_at(
    tokens: &[TokenSpan],
    options: &ParseOptions,
) -> Result<(Loop, usize), ParseError> {
    let mut cursor = TokenCursor::from_tokens(tokens);
    let lp = parse_loop(&mut cursor, options)?;
    Ok((lp, cursor.index()))
}

fn read_loop(cursor: &mut TokenCursor<'_>, options: &ParseOptions) -> Result<Loop, ParseError> {
    let (fields_offset, fields_index) = (cursor.offset(), cursor.index());
    let fields = read_fields(cursor);
    if fields.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyFields,
            fields_offset,
            fields_index,
        ));
    }
    tracing::trace!(count = fields.len(), "loop fields read");

    let (values_offset, values_index) = (cursor.offset(), cursor.index());
    let values = read_values(cursor);
    if values.is_empty() && !options.allow_empty_loops {
        return Err(ParseError::new(
            ParseErrorKind::EmptyValues,
            values_offset,
            values_index,
        ));
    }

    let width = fields.len();
    let count = values.len();
    let rows = reshape(values, width).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::RowAlignment {
                fields: width,
                values: count,
            },
            values_offset,
            values_index,
        )
    })?;

    tracing::debug!(fields = width, rows = rows.len(), offset = fields_offset, "parsed loop");
    Ok(Loop::new(fields, rows).with_span(fields_offset..cursor.consumed_end()))
}

fn read_fields(cursor: &mut TokenCursor<'_>) -> Vec<String> {
    let mut fields = Vec::new();
    while let Some(token) = cursor.peek() {
        match token {
            Token::DataName(name) => fields.push(name.clone()),
            Token::Comment(_) => {}
            _ => break,
        }
        cursor.advance();
    }
    fields
}

fn read_values(cursor: &mut TokenCursor<'_>) -> Vec<Value> {
    let mut values = Vec::new();
    while let Some(token) = cursor.peek() {
        match token.to_value() {
            Some(value) => values.push(value),
            None if token.is_comment() => {}
            None => break,
        }
        cursor.advance();
    }
    values
}

/// Cut a flat value run into rows of `width` values
///
/// Returns `None` when `width` is zero or the values do not fill whole rows.
pub fn reshape<T>(values: Vec<T>, width: usize) -> Option<Vec<Vec<T>>> {
    if width == 0 || values.len() % width != 0 {
        return None;
    }
    let row_count = values.len() / width;
    let mut values = values.into_iter();
    Some(
        (0..row_count)
            .map(|_| values.by_ref().take(width).collect())
            .collect(),
    )
}
