//! A single scalar of whatever kind the input holds.

use crate::error::Result;
use crate::read::{ReadBytes, Reader};
use crate::traits::{WireKind, WireSchema};
use crate::write::{WriteBytes, Writer};

/// Any scalar value.
///
/// Decoding and re-encoding a `BasicValue` with the same format reproduces
/// the original bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BasicValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    UnsignedInteger(u64),
    Real(f64),
    String(String),
}

impl WireSchema for BasicValue {
    const KIND: WireKind = WireKind::Any;
}

impl ReadBytes for BasicValue {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        *self = source.basic()?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = BasicValue::Null;
    }
}

impl WriteBytes for BasicValue {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        match self {
            BasicValue::Null => dest.null(),
            BasicValue::Boolean(value) => dest.boolean(*value),
            BasicValue::Integer(value) => dest.integer(*value),
            BasicValue::UnsignedInteger(value) => dest.unsigned_integer(*value),
            BasicValue::Real(value) => dest.real(*value),
            BasicValue::String(value) => dest.string(value),
        }
    }
}

impl From<bool> for BasicValue {
    fn from(value: bool) -> Self {
        BasicValue::Boolean(value)
    }
}

impl From<i64> for BasicValue {
    fn from(value: i64) -> Self {
        BasicValue::Integer(value)
    }
}

impl From<u64> for BasicValue {
    fn from(value: u64) -> Self {
        BasicValue::UnsignedInteger(value)
    }
}

impl From<f64> for BasicValue {
    fn from(value: f64) -> Self {
        BasicValue::Real(value)
    }
}

impl From<String> for BasicValue {
    fn from(value: String) -> Self {
        BasicValue::String(value)
    }
}

impl From<&str> for BasicValue {
    fn from(value: &str) -> Self {
        BasicValue::String(value.to_owned())
    }
}
