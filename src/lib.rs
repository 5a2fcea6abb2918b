//! # cifloop
//!
//! A parser for the loop blocks of CIF-style tag-value data files.
//!
//! A loop block is a `loop_` marker, a header of data names and a flat run of
//! values. The values are regrouped into rows whose width is the number of
//! data names:
//!
//! ```text
//! loop_
//! _a _b
//! 1 2 3 4
//! ```
//!
//! parses to a [`Loop`](cif::ast::Loop) with fields `(_a, _b)` and rows
//! `(1, 2)`, `(3, 4)`.
//!
//! The entry points most callers want are [`cif::parsing::parse_document`]
//! and [`cif::processor::Processor`].

pub mod cif;
