//! Schema driven serialization without an intermediate document tree.
//!
//! A type describes its wire shape once, through [`ReadBytes`] and
//! [`WriteBytes`] (usually generated by [`wire_object!`]), and is then
//! streamed directly to or from any supported format:
//!
//! - [`json`] - JSON text; binary values are hex strings
//! - [`epee`] - the tagged "portable storage" binary format
//!
//! Decoding validates the schema as it goes: required and duplicate keys,
//! array limits, integer ranges and nesting depth. Every failure is a
//! [`WireError`].
//!
//! # Example
//!
//! ```
//! use wire::{wire_object, EpeeBin, Format, Json};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Output {
//!     amount: u64,
//!     key: [u8; 4],
//! }
//!
//! wire_object!(Output { amount, key });
//!
//! let output = Output { amount: 42, key: [1, 2, 3, 4] };
//! assert_eq!(
//!     Json::to_bytes(&output).unwrap(),
//!     br#"{"amount":42,"key":"01020304"}"#
//! );
//!
//! let bytes = EpeeBin::to_bytes(&output).unwrap();
//! assert_eq!(EpeeBin::decode::<Output>(&bytes).unwrap(), output);
//! ```

mod basic_value;
mod constants;
mod error;
mod field;
mod format;
mod integer;
mod macros;
mod options;
mod traits;

pub mod epee;
pub mod json;
pub mod read;
pub mod wrapper;
pub mod write;

pub use basic_value::BasicValue;
pub use constants::{EncodingFormat, MAX_READ_DEPTH, MAX_SUBFIELDS};
pub use error::{Result, Schema, WireError};
pub use field::{field, optional_field, Field, ReadField, WriteField};
pub use format::{EpeeBin, Format, Json};
pub use integer::{cast_signed, cast_unsigned};
pub use options::{ReadOptions, UnknownKeys};
pub use read::{Depth, ReadBytes, Reader};
pub use traits::{
    ArrayConstraint, ArrayElement, Blob, MaxElementCount, MinElementSize, WireArray, WireKind,
    WireSchema,
};
pub use wrapper::{optional_variant, variant, WireVariant};
pub use write::{WriteBytes, Writer};
