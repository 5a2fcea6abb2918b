//! Main module for cifloop library functionality

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod processor;

pub use error::{Error, Result};
