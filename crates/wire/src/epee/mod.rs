//! Portable storage ("epee binary") format.

mod constants;
mod error;
mod reader;
mod writer;

pub use constants::{
    read_varint, write_varint, Kind, Tag, FLAG_ARRAY, FORMAT_VERSION, HEADER_SIZE, MAX_VARINT,
    SIGNATURE_A, SIGNATURE_B,
};
pub use error::EpeeError;
pub use reader::EpeeReader;
pub use writer::EpeeWriter;

use crate::error::Result;
use crate::options::ReadOptions;
use crate::read::{self, ReadBytes};
use crate::write::WriteBytes;

/// Decodes `dest` from portable storage, replacing its contents.
pub fn from_bytes<T: ReadBytes>(source: &[u8], dest: &mut T) -> Result<()> {
    from_bytes_with(source, dest, ReadOptions::default())
}

pub fn from_bytes_with<T: ReadBytes>(
    source: &[u8],
    dest: &mut T,
    options: ReadOptions,
) -> Result<()> {
    if T::OPTIONAL_ROOT && source.is_empty() {
        dest.reset();
        return Ok(());
    }
    let mut reader = EpeeReader::with_options(source, options)?;
    read::from_reader(&mut reader, dest)
}

/// Encodes `value`, which must be written as an object, to portable storage.
pub fn to_bytes<T: WriteBytes + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut writer = EpeeWriter::new();
    value.write_bytes(&mut writer)?;
    writer.finish()
}
