//! Field wrappers that change how a borrowed value is encoded.
//!
//! Wrappers hold `&mut T` when reading and `&T` when writing, so one
//! schema declaration serves both directions.

mod array;
mod array_blob;
mod blob;
mod defaulted;
mod range;
mod variant;

pub use array::{array, array_of, Array, Direct, Nested, ReadElement, WriteElement};
pub use array_blob::{array_as_blob, read_as_blob, ArrayAsBlob};
pub use blob::{blob, read_blob, write_blob, BlobField};
pub use defaulted::{defaulted, Defaulted};
pub use range::{range, Range};
pub use variant::{optional_variant, variant, VariantField, WireVariant};
