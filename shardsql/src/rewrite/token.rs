//! Positional edit instructions against the original SQL text.
//!
//! Each token claims a position in the original statement and renders the
//! replacement text through `Display`. The splicer walks tokens in
//! ascending start order, replacing `[start, stop]` spans inclusive, or
//! inserting at `start` when the token has no stop index.

use std::fmt::Display;

use crate::value::ParameterValue;

/// An expression value lifted out of the statement by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A plain literal value.
    Literal(ParameterValue),
    /// A computed expression, kept as its original source text.
    Complex { text: String },
}

/// A positional edit against the original SQL text.
pub trait SqlToken: Display {
    /// Inclusive offset where the edit starts.
    fn start_index(&self) -> usize;

    /// Inclusive end of the replaced span. Insertion tokens return `None`.
    fn stop_index(&self) -> Option<usize> {
        None
    }
}

/// Replaces a column value with its encrypted form.
///
/// Literal strings render single-quoted, other literals render in their
/// natural form, and complex expressions pass through unmodified: only
/// literal values are subject to encryption substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptValueToken {
    start_index: usize,
    stop_index: usize,
    value: Expression,
}

impl EncryptValueToken {
    pub fn new(start_index: usize, stop_index: usize, value: Expression) -> Self {
        debug_assert!(stop_index >= start_index);
        Self {
            start_index,
            stop_index,
            value,
        }
    }

    pub fn value(&self) -> &Expression {
        &self.value
    }
}

impl Display for EncryptValueToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            // ParameterValue renders its own SQL literal form, quoting
            // and escaping strings.
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Complex { text } => f.write_str(text),
        }
    }
}

impl SqlToken for EncryptValueToken {
    fn start_index(&self) -> usize {
        self.start_index
    }

    fn stop_index(&self) -> Option<usize> {
        Some(self.stop_index)
    }
}

/// Replaces a literal OFFSET/LIMIT magnitude with its revised value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationToken {
    start_index: usize,
    stop_index: usize,
    value: u64,
}

impl PaginationToken {
    pub fn new(start_index: usize, stop_index: usize, value: u64) -> Self {
        debug_assert!(stop_index >= start_index);
        Self {
            start_index,
            stop_index,
            value,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Display for PaginationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl SqlToken for PaginationToken {
    fn start_index(&self) -> usize {
        self.start_index
    }

    fn stop_index(&self) -> Option<usize> {
        Some(self.stop_index)
    }
}
