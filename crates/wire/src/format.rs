//! Format selectors.
//!
//! Generic code that needs to pick a format at compile time takes
//! `F: Format`; the free functions in [`crate::json`] and [`crate::epee`]
//! are the same operations without the indirection.

use crate::constants::EncodingFormat;
use crate::error::Result;
use crate::options::ReadOptions;
use crate::read::ReadBytes;
use crate::write::WriteBytes;
use crate::{epee, json};

pub trait Format {
    /// Short identifier of the format.
    const ID: &'static str;
    const FORMAT: EncodingFormat;

    fn from_bytes_with<T: ReadBytes>(source: &[u8], dest: &mut T, options: ReadOptions)
        -> Result<()>;

    fn from_bytes<T: ReadBytes>(source: &[u8], dest: &mut T) -> Result<()> {
        Self::from_bytes_with(source, dest, ReadOptions::default())
    }

    /// Decodes into a fresh value.
    fn decode<T: ReadBytes + Default>(source: &[u8]) -> Result<T> {
        let mut value = T::default();
        Self::from_bytes(source, &mut value)?;
        Ok(value)
    }

    fn to_bytes<T: WriteBytes + ?Sized>(value: &T) -> Result<Vec<u8>>;
}

/// JSON text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

/// Portable storage binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpeeBin;

impl Format for Json {
    const ID: &'static str = "json";
    const FORMAT: EncodingFormat = EncodingFormat::Json;

    fn from_bytes_with<T: ReadBytes>(
        source: &[u8],
        dest: &mut T,
        options: ReadOptions,
    ) -> Result<()> {
        json::from_bytes_with(source, dest, options)
    }

    fn to_bytes<T: WriteBytes + ?Sized>(value: &T) -> Result<Vec<u8>> {
        json::to_bytes(value)
    }
}

impl Format for EpeeBin {
    const ID: &'static str = "epee";
    const FORMAT: EncodingFormat = EncodingFormat::EpeeBinary;

    fn from_bytes_with<T: ReadBytes>(
        source: &[u8],
        dest: &mut T,
        options: ReadOptions,
    ) -> Result<()> {
        epee::from_bytes_with(source, dest, options)
    }

    fn to_bytes<T: WriteBytes + ?Sized>(value: &T) -> Result<Vec<u8>> {
        epee::to_bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identify<F: Format>() -> (&'static str, EncodingFormat) {
        (F::ID, F::FORMAT)
    }

    #[test]
    fn identifiers() {
        assert_eq!(identify::<Json>(), ("json", EncodingFormat::Json));
        assert_eq!(identify::<EpeeBin>(), ("epee", EncodingFormat::EpeeBinary));
    }

    #[test]
    fn decode_builds_a_fresh_value() {
        let value: Vec<u32> = Json::decode(b"[1,2,3]").unwrap();
        assert_eq!(value, vec![1, 2, 3]);
        let none: Option<Vec<u32>> = Json::decode(b"").unwrap();
        assert_eq!(none, None);
    }
}
