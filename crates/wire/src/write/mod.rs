//! Format independent writing.

mod array;
mod object;

use std::collections::{BTreeSet, VecDeque};

pub use array::array;
pub use object::object;

use crate::error::{Result, WireError};
use crate::traits::{ArrayElement, WireSchema};

/// Push interface implemented by every output format.
///
/// The fixed width integer methods default to the 64-bit ones; binary
/// formats override them to keep the narrower encoding.
pub trait Writer {
    /// Whether [`Writer::start_array`] needs the real element count.
    fn need_array_size(&self) -> bool {
        false
    }

    fn null(&mut self) -> Result<()>;

    fn boolean(&mut self, value: bool) -> Result<()>;

    fn integer(&mut self, value: i64) -> Result<()>;

    fn unsigned_integer(&mut self, value: u64) -> Result<()>;

    fn int8(&mut self, value: i8) -> Result<()> {
        self.integer(value.into())
    }

    fn int16(&mut self, value: i16) -> Result<()> {
        self.integer(value.into())
    }

    fn int32(&mut self, value: i32) -> Result<()> {
        self.integer(value.into())
    }

    fn uint8(&mut self, value: u8) -> Result<()> {
        self.unsigned_integer(value.into())
    }

    fn uint16(&mut self, value: u16) -> Result<()> {
        self.unsigned_integer(value.into())
    }

    fn uint32(&mut self, value: u32) -> Result<()> {
        self.unsigned_integer(value.into())
    }

    fn real(&mut self, value: f64) -> Result<()>;

    fn string(&mut self, value: &str) -> Result<()>;

    fn binary(&mut self, value: &[u8]) -> Result<()>;

    fn start_array(&mut self, count: usize) -> Result<()>;

    fn end_array(&mut self) -> Result<()>;

    fn start_object(&mut self, count: usize) -> Result<()>;

    fn key(&mut self, name: &str) -> Result<()>;

    /// Writes a key given as raw bytes.
    fn binary_key(&mut self, name: &[u8]) -> Result<()>;

    fn end_object(&mut self) -> Result<()>;
}

/// Types that can be encoded to any [`Writer`].
pub trait WriteBytes: WireSchema {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()>;
}

impl<T: WriteBytes + ?Sized> WriteBytes for &T {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        (**self).write_bytes(dest)
    }
}

impl<T: WriteBytes + ?Sized> WriteBytes for &mut T {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        (**self).write_bytes(dest)
    }
}

impl WriteBytes for bool {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.boolean(*self)
    }
}

macro_rules! write_integers {
    ($($ty:ty => $method:ident),*) => {$(
        impl WriteBytes for $ty {
            fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
                dest.$method((*self).into())
            }
        }
    )*};
}

write_integers!(
    i8 => int8,
    i16 => int16,
    i32 => int32,
    i64 => integer,
    u8 => uint8,
    u16 => uint16,
    u32 => uint32,
    u64 => unsigned_integer
);

impl WriteBytes for isize {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.integer(*self as i64)
    }
}

impl WriteBytes for usize {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.unsigned_integer(*self as u64)
    }
}

impl WriteBytes for f64 {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.real(*self)
    }
}

impl WriteBytes for String {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.string(self)
    }
}

impl WriteBytes for Vec<u8> {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.binary(self)
    }
}

impl<const N: usize> WriteBytes for [u8; N] {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.binary(self)
    }
}

impl<T: WriteBytes> WriteBytes for Option<T> {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        match self {
            Some(value) => value.write_bytes(dest),
            None => Err(WireError::Traversal("absent optional value written")),
        }
    }
}

macro_rules! write_sequences {
    ($($container:ident),*) => {$(
        impl<T: ArrayElement + WriteBytes> WriteBytes for $container<T> {
            fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
                array(dest, self.iter(), |dest, value| value.write_bytes(dest))
            }
        }
    )*};
}

write_sequences!(Vec, VecDeque, BTreeSet);
