//! Compile-time schema traits.
//!
//! [`WireSchema`] describes how a type appears on the wire: its value kind,
//! whether an empty value may be left out of an object, and whether a
//! completely empty input is an acceptable encoding of it. Reading and
//! writing live in [`ReadBytes`](crate::ReadBytes) and
//! [`WriteBytes`](crate::WriteBytes).

use std::collections::{BTreeSet, VecDeque};

use crate::basic_value::BasicValue;
use crate::error::Result;

/// Value kinds known to every format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Boolean,
    Integer,
    Real,
    String,
    Binary,
    Object,
    Array,
    /// Any scalar, decided by the input.
    Any,
}

pub trait WireSchema {
    const KIND: WireKind;

    /// An empty value of this type is omitted from objects and the field is
    /// treated as optional on read.
    const OPTIONAL_ON_EMPTY: bool = false;

    /// A completely empty input decodes to the default value.
    const OPTIONAL_ROOT: bool = false;

    /// Exact payload size of fixed-size binary values.
    const FIXED_SIZE: Option<usize> = None;

    /// Whether the value is "empty" in the sense of `OPTIONAL_ON_EMPTY`.
    fn is_empty(&self) -> bool {
        false
    }
}

/// Types allowed inside wire arrays.
///
/// `u8` and `i8` never implement this: a sequence of bytes is binary, not an
/// array of integers.
pub trait ArrayElement {}

/// Container contract used by the array drivers.
pub trait WireArray {
    type Element;

    fn wire_len(&self) -> usize;

    fn wire_clear(&mut self);

    fn wire_reserve(&mut self, _additional: usize) {}

    /// Appends one element, decoding it with `read`.
    fn wire_insert<F>(&mut self, read: F) -> Result<()>
    where
        F: FnOnce(&mut Self::Element) -> Result<()>;

    fn wire_iter(&self) -> impl Iterator<Item = &Self::Element> + Clone;
}

/// Array limits. Unset limits are `0` for the size and `usize::MAX` for
/// the count.
pub trait ArrayConstraint {
    const MIN_ELEMENT_SIZE: usize = 0;
    const MAX_ELEMENT_COUNT: usize = usize::MAX;
}

/// Every array element must consume at least `N` input bytes on average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinElementSize<const N: usize>;

/// An array may hold at most `N` elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxElementCount<const N: usize>;

impl<const N: usize> ArrayConstraint for MinElementSize<N> {
    const MIN_ELEMENT_SIZE: usize = N;
}

impl<const N: usize> ArrayConstraint for MaxElementCount<N> {
    const MAX_ELEMENT_COUNT: usize = N;
}

/// Fixed-size values stored as opaque bytes.
///
/// Multi-byte integers use little-endian order.
pub trait Blob: Sized {
    const SIZE: usize;

    /// Builds a value from exactly `SIZE` bytes.
    fn from_wire(bytes: &[u8]) -> Self;

    fn to_wire(&self, out: &mut Vec<u8>);
}

impl<const N: usize> Blob for [u8; N] {
    const SIZE: usize = N;

    fn from_wire(bytes: &[u8]) -> Self {
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        out
    }

    fn to_wire(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

macro_rules! le_blob {
    ($($ty:ty),*) => {$(
        impl Blob for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            fn from_wire(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }

            fn to_wire(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

le_blob!(u16, u32, u64, i16, i32, i64);

// ---------------------------------------------------------------------------
// Schema of std types
// ---------------------------------------------------------------------------

macro_rules! scalar_schema {
    ($kind:ident: $($ty:ty),*) => {$(
        impl WireSchema for $ty {
            const KIND: WireKind = WireKind::$kind;
        }
    )*};
}

scalar_schema!(Boolean: bool);
scalar_schema!(Integer: i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
scalar_schema!(Real: f64);
scalar_schema!(String: String);
scalar_schema!(Binary: Vec<u8>);

impl ArrayElement for bool {}
impl ArrayElement for i16 {}
impl ArrayElement for i32 {}
impl ArrayElement for i64 {}
impl ArrayElement for isize {}
impl ArrayElement for u16 {}
impl ArrayElement for u32 {}
impl ArrayElement for u64 {}
impl ArrayElement for usize {}
impl ArrayElement for f64 {}
impl ArrayElement for String {}
impl ArrayElement for Vec<u8> {}
impl ArrayElement for BasicValue {}

impl<const N: usize> WireSchema for [u8; N] {
    const KIND: WireKind = WireKind::Binary;
    const FIXED_SIZE: Option<usize> = Some(N);
}

impl<const N: usize> ArrayElement for [u8; N] {}

impl<T: WireSchema> WireSchema for Option<T> {
    const KIND: WireKind = T::KIND;
    const OPTIONAL_ON_EMPTY: bool = true;
    const OPTIONAL_ROOT: bool = true;
    const FIXED_SIZE: Option<usize> = T::FIXED_SIZE;

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

macro_rules! sequence_schema {
    ($($container:ident),*) => {$(
        impl<T: ArrayElement> WireSchema for $container<T> {
            const KIND: WireKind = WireKind::Array;
            const OPTIONAL_ON_EMPTY: bool = true;

            fn is_empty(&self) -> bool {
                $container::is_empty(self)
            }
        }

        impl<T: ArrayElement> ArrayElement for $container<T> {}
    )*};
}

sequence_schema!(Vec, VecDeque, BTreeSet);

impl<T: WireSchema + ?Sized> WireSchema for &T {
    const KIND: WireKind = T::KIND;
    const OPTIONAL_ON_EMPTY: bool = T::OPTIONAL_ON_EMPTY;
    const OPTIONAL_ROOT: bool = T::OPTIONAL_ROOT;
    const FIXED_SIZE: Option<usize> = T::FIXED_SIZE;

    fn is_empty(&self) -> bool {
        T::is_empty(self)
    }
}

impl<T: WireSchema + ?Sized> WireSchema for &mut T {
    const KIND: WireKind = T::KIND;
    const OPTIONAL_ON_EMPTY: bool = T::OPTIONAL_ON_EMPTY;
    const OPTIONAL_ROOT: bool = T::OPTIONAL_ROOT;
    const FIXED_SIZE: Option<usize> = T::FIXED_SIZE;

    fn is_empty(&self) -> bool {
        T::is_empty(self)
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

impl<T: Default> WireArray for Vec<T> {
    type Element = T;

    fn wire_len(&self) -> usize {
        self.len()
    }

    fn wire_clear(&mut self) {
        self.clear();
    }

    fn wire_reserve(&mut self, additional: usize) {
        self.reserve(additional);
    }

    fn wire_insert<F>(&mut self, read: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        self.push(T::default());
        match self.last_mut() {
            Some(slot) => read(slot),
            None => Ok(()),
        }
    }

    fn wire_iter(&self) -> impl Iterator<Item = &T> + Clone {
        self.iter()
    }
}

impl<T: Default> WireArray for VecDeque<T> {
    type Element = T;

    fn wire_len(&self) -> usize {
        self.len()
    }

    fn wire_clear(&mut self) {
        self.clear();
    }

    fn wire_reserve(&mut self, additional: usize) {
        self.reserve(additional);
    }

    fn wire_insert<F>(&mut self, read: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        self.push_back(T::default());
        match self.back_mut() {
            Some(slot) => read(slot),
            None => Ok(()),
        }
    }

    fn wire_iter(&self) -> impl Iterator<Item = &T> + Clone {
        self.iter()
    }
}

/// Sorted containers decode into a temporary and insert it afterwards;
/// duplicates collapse.
impl<T: Default + Ord> WireArray for BTreeSet<T> {
    type Element = T;

    fn wire_len(&self) -> usize {
        self.len()
    }

    fn wire_clear(&mut self) {
        self.clear();
    }

    fn wire_insert<F>(&mut self, read: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let mut value = T::default();
        read(&mut value)?;
        self.insert(value);
        Ok(())
    }

    fn wire_iter(&self) -> impl Iterator<Item = &T> + Clone {
        self.iter()
    }
}
