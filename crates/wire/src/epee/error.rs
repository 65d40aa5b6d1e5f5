//! Portable storage error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpeeError {
    #[error("not enough bytes for {0}")]
    NotEnoughBytes(&'static str),
    #[error("invalid portable storage signature")]
    Signature,
    #[error("unsupported portable storage version {0}")]
    Version(u8),
    #[error("invalid type tag 0x{0:02x}")]
    InvalidTag(u8),
    #[error("{0} trailing bytes after the root object")]
    TrailingBytes(usize),
    #[error("varint value {0} exceeds the encodable range")]
    VarintOverflow(u64),
    #[error("key of {0} bytes exceeds the 255 byte limit")]
    KeyTooLong(usize),
    #[error("root value must be an object")]
    RootNotObject,
    #[error("array elements of different kinds")]
    MixedArray,
    #[error("{0} cannot be encoded in portable storage")]
    Unsupported(&'static str),
}
