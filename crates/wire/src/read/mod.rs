//! Format independent reading.
//!
//! A [`Reader`] is a pull tokenizer over one input buffer. Types implement
//! [`ReadBytes`] to pull themselves out of any reader; the
//! [`object`] and [`array`] drivers do the bookkeeping shared by every
//! compound type.

mod array;
mod object;

use std::collections::{BTreeSet, VecDeque};

pub use array::array;
pub use object::object;

use crate::basic_value::BasicValue;
use crate::constants::MAX_READ_DEPTH;
use crate::error::{fail, Result, Schema};
use crate::integer::{cast_signed, cast_unsigned};
use crate::traits::{ArrayElement, WireKind, WireSchema};

/// Pull interface implemented by every input format.
///
/// The trait is object safe; generic code takes `R: Reader + ?Sized` so a
/// `&mut dyn Reader` drives the same paths as a concrete reader.
pub trait Reader {
    /// Current object/array nesting.
    fn depth(&self) -> usize;

    /// Unconsumed input bytes.
    fn remaining(&self) -> usize;

    /// Whether arrays end with a delimiter rather than a leading count.
    fn delimited_arrays(&self) -> bool;

    /// Smallest number of bytes one array element of `kind` can occupy.
    fn min_element_size(&self, kind: WireKind) -> usize;

    /// Smallest encoding of one binary value of exactly `size` bytes.
    fn min_binary_size(&self, size: usize) -> usize;

    /// Fails unless the input was consumed completely at depth zero.
    fn check_complete(&self) -> Result<()>;

    /// Reads a scalar of whatever kind the input holds.
    fn basic(&mut self) -> Result<BasicValue>;

    fn boolean(&mut self) -> Result<bool>;

    fn integer(&mut self) -> Result<i64>;

    fn unsigned_integer(&mut self) -> Result<u64>;

    fn real(&mut self) -> Result<f64>;

    fn string(&mut self) -> Result<String>;

    /// Copies a string into `dest`, returning the number of bytes written.
    /// With `exact` the string must fill `dest` completely.
    fn string_into(&mut self, dest: &mut [u8], exact: bool) -> Result<usize>;

    fn binary(&mut self) -> Result<Vec<u8>>;

    /// Binary counterpart of [`Reader::string_into`].
    fn binary_into(&mut self, dest: &mut [u8], exact: bool) -> Result<usize>;

    /// Enters an array and returns its element count, or `0` for formats
    /// that delimit arrays. Counted formats reject counts that cannot fit
    /// the remaining input at `min_element_size` bytes each.
    fn start_array(&mut self, min_element_size: usize) -> Result<usize>;

    /// `count` is the number of elements still expected. Delimited formats
    /// see `0` before the first element and a wrapped-around value after.
    fn is_array_end(&mut self, count: usize) -> Result<bool>;

    fn end_array(&mut self);

    /// Enters an object and returns the state to hand to [`Reader::key`].
    fn start_object(&mut self) -> Result<usize>;

    /// Advances to the next key that appears in `map` and returns its
    /// index, or `None` when the object ends. Keys outside `map` are
    /// skipped or rejected depending on the reader's options.
    fn key(&mut self, map: &[&str], state: &mut usize) -> Result<Option<usize>>;

    fn end_object(&mut self);
}

/// Nesting counter shared by reader implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Depth(usize);

impl Depth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0
    }

    pub fn increment(&mut self) -> Result<()> {
        if self.0 == MAX_READ_DEPTH {
            return fail(
                Schema::MaximumDepth,
                format_args!("nesting exceeds {MAX_READ_DEPTH} levels"),
            );
        }
        self.0 += 1;
        Ok(())
    }

    pub fn decrement(&mut self) {
        debug_assert!(self.0 != 0, "unbalanced end of array/object");
        self.0 = self.0.saturating_sub(1);
    }
}

/// Types that can be decoded from any [`Reader`].
pub trait ReadBytes: WireSchema {
    /// Decodes in place, overwriting the current value.
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()>;

    /// Resets the value to the state an absent optional field leaves it in.
    fn reset(&mut self) {}
}

/// Decodes `dest` from `source` and requires the input to be consumed.
pub fn from_reader<R, T>(source: &mut R, dest: &mut T) -> Result<()>
where
    R: Reader + ?Sized,
    T: ReadBytes + ?Sized,
{
    dest.read_bytes(source)?;
    source.check_complete()
}

impl<T: ReadBytes + ?Sized> ReadBytes for &mut T {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        (**self).read_bytes(source)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

impl ReadBytes for bool {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        *self = source.boolean()?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = false;
    }
}

macro_rules! read_integers {
    ($read:ident, $cast:ident: $($ty:ty),*) => {$(
        impl ReadBytes for $ty {
            fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
                *self = $cast(source.$read()?)?;
                Ok(())
            }

            fn reset(&mut self) {
                *self = 0;
            }
        }
    )*};
}

read_integers!(integer, cast_signed: i8, i16, i32, i64, isize);
read_integers!(unsigned_integer, cast_unsigned: u8, u16, u32, u64, usize);

impl ReadBytes for f64 {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        *self = source.real()?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = 0.0;
    }
}

impl ReadBytes for String {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        *self = source.string()?;
        Ok(())
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl ReadBytes for Vec<u8> {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        *self = source.binary()?;
        Ok(())
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl<const N: usize> ReadBytes for [u8; N] {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        source.binary_into(self, true)?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = [0; N];
    }
}

impl<T: ReadBytes + Default> ReadBytes for Option<T> {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        self.get_or_insert_with(T::default).read_bytes(source)
    }

    fn reset(&mut self) {
        *self = None;
    }
}

/// Per-element input floor used by arrays without an explicit
/// [`MinElementSize`](crate::MinElementSize): fixed-size binary elements
/// must carry their whole payload, everything else the smallest value of
/// its kind.
pub fn default_min_element_size<T, R>(source: &R) -> usize
where
    T: WireSchema,
    R: Reader + ?Sized,
{
    match T::FIXED_SIZE {
        Some(size) => source.min_binary_size(size),
        None => source.min_element_size(T::KIND),
    }
}

impl<T: ArrayElement + ReadBytes + Default> ReadBytes for Vec<T> {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        let min = default_min_element_size::<T, R>(source);
        array(source, self, min, usize::MAX, &crate::wrapper::Direct)
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl<T: ArrayElement + ReadBytes + Default> ReadBytes for VecDeque<T> {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        let min = default_min_element_size::<T, R>(source);
        array(source, self, min, usize::MAX, &crate::wrapper::Direct)
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl<T: ArrayElement + ReadBytes + Default + Ord> ReadBytes for BTreeSet<T> {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        let min = default_min_element_size::<T, R>(source);
        array(source, self, min, usize::MAX, &crate::wrapper::Direct)
    }

    fn reset(&mut self) {
        self.clear();
    }
}
