//! JSON format.
//!
//! Binary values are lowercase hex strings. Integers keep their sign
//! lexically: a leading `-` reads as signed, anything else without a
//! fraction or exponent as unsigned.

mod error;
mod reader;
mod util;
mod writer;

pub use error::JsonError;
pub use reader::JsonReader;
pub use util::find_ending_quote;
pub use writer::JsonWriter;

use crate::error::Result;
use crate::options::ReadOptions;
use crate::read::{self, ReadBytes};
use crate::write::WriteBytes;

/// Decodes `dest` from JSON, replacing its contents.
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
    let mut reader = JsonReader::with_options(source, options);
    read::from_reader(&mut reader, dest)
}

pub fn from_str<T: ReadBytes>(source: &str, dest: &mut T) -> Result<()> {
    from_bytes(source.as_bytes(), dest)
}

pub fn to_bytes<T: WriteBytes + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut writer = JsonWriter::new();
    value.write_bytes(&mut writer)?;
    writer.finish()
}

pub fn to_string<T: WriteBytes + ?Sized>(value: &T) -> Result<String> {
    let bytes = to_bytes(value)?;
    // every byte came from `serde_json` or ASCII punctuation
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
