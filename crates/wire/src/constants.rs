//! Crate wide limits and format identifiers.

/// Encoding format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFormat {
    Json = 0,
    EpeeBinary = 1,
}

/// Deepest object/array nesting a reader accepts.
pub const MAX_READ_DEPTH: usize = 100;

/// Size of the key table used while reading one object. An object may
/// declare at most `MAX_SUBFIELDS - 1` wire names.
pub const MAX_SUBFIELDS: usize = 100;
