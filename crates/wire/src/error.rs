//! Error types shared by every wire format.

use std::fmt;

use thiserror::Error;

use crate::epee::EpeeError;
use crate::json::JsonError;

/// Schema violation kinds raised while reading or writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Schema {
    #[error("expected a boolean")]
    Boolean,
    #[error("expected an integer")]
    Integer,
    #[error("expected a number")]
    Number,
    #[error("expected a string")]
    String,
    #[error("expected binary")]
    Binary,
    #[error("expected binary of a fixed size")]
    FixedBinary,
    #[error("expected an array")]
    Array,
    #[error("expected an object")]
    Object,
    #[error("missing required field")]
    MissingKey,
    #[error("invalid or duplicate field")]
    InvalidKey,
    #[error("array elements smaller than the minimum element size")]
    ArrayMinSize,
    #[error("array has more elements than allowed")]
    ArrayMaxElement,
    #[error("expected a larger integer")]
    LargerInteger,
    #[error("expected a smaller integer")]
    SmallerInteger,
    #[error("maximum nesting depth exceeded")]
    MaximumDepth,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WireError {
    #[error("schema violation: {0}")]
    Schema(Schema),
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
    #[error("object declares {0} subfields, the limit is {limit}", limit = crate::MAX_SUBFIELDS - 1)]
    TooManyFields(usize),
    #[error("invalid read/write sequence: {0}")]
    Traversal(&'static str),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Epee(#[from] EpeeError),
}

impl WireError {
    /// The schema kind behind this error, if it has one.
    pub fn schema(&self) -> Option<Schema> {
        match self {
            WireError::Schema(kind) => Some(*kind),
            WireError::MissingKeys(_) => Some(Schema::MissingKey),
            _ => None,
        }
    }

    /// Names of the required fields that were absent.
    pub fn missing_keys(&self) -> &[&'static str] {
        match self {
            WireError::MissingKeys(names) => names,
            _ => &[],
        }
    }
}

impl From<Schema> for WireError {
    fn from(kind: Schema) -> Self {
        WireError::Schema(kind)
    }
}

pub type Result<T, E = WireError> = std::result::Result<T, E>;

/// Logs `detail` and returns `error`.
pub(crate) fn fail<T>(error: impl Into<WireError>, detail: fmt::Arguments<'_>) -> Result<T> {
    let error = error.into();
    tracing::debug!(%error, "{detail}");
    Err(error)
}
