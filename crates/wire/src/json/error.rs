//! JSON reader/writer error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("expected {expected} at byte {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },
    #[error("unterminated string starting at byte {0}")]
    StringMissQuotation(usize),
    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),
    #[error("invalid escape sequence in string at byte {0}")]
    InvalidString(usize),
    #[error("{0} trailing bytes after the root value")]
    TrailingCharacters(usize),
    #[error("invalid JSON at byte {offset}: {message}")]
    Parse { offset: usize, message: String },
    #[error("non-finite numbers cannot be written as JSON")]
    NonFinite,
}
