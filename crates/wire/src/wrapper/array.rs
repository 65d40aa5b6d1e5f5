//! Arrays with explicit limits.

use std::marker::PhantomData;
use std::ops::Deref;

use crate::error::Result;
use crate::read::{self, ReadBytes, Reader};
use crate::traits::{ArrayConstraint, ArrayElement, WireArray, WireKind, WireSchema};
use crate::write::{self, WriteBytes, Writer};

/// How the elements of an array are read.
pub trait ReadElement<T> {
    fn read<R: Reader + ?Sized>(&self, source: &mut R, dest: &mut T) -> Result<()>;
}

/// How the elements of an array are written.
pub trait WriteElement<T> {
    fn write<W: Writer + ?Sized>(&self, dest: &mut W, value: &T) -> Result<()>;
}

/// Elements encode themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Direct;

impl<T: ArrayElement + ReadBytes> ReadElement<T> for Direct {
    fn read<R: Reader + ?Sized>(&self, source: &mut R, dest: &mut T) -> Result<()> {
        dest.read_bytes(source)
    }
}

impl<T: ArrayElement + WriteBytes> WriteElement<T> for Direct {
    fn write<W: Writer + ?Sized>(&self, dest: &mut W, value: &T) -> Result<()> {
        value.write_bytes(dest)
    }
}

/// Elements are themselves arrays limited by `C`, whose elements are
/// handled by `E`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nested<C, E = Direct>(pub C, pub E);

impl<A, C, E> ReadElement<A> for Nested<C, E>
where
    A: WireArray,
    C: ArrayConstraint,
    E: ReadElement<A::Element>,
{
    fn read<R: Reader + ?Sized>(&self, source: &mut R, dest: &mut A) -> Result<()> {
        read::array(
            source,
            dest,
            C::MIN_ELEMENT_SIZE,
            C::MAX_ELEMENT_COUNT,
            &self.1,
        )
    }
}

impl<A, C, E> WriteElement<A> for Nested<C, E>
where
    A: WireArray,
    E: WriteElement<A::Element>,
{
    fn write<W: Writer + ?Sized>(&self, dest: &mut W, value: &A) -> Result<()> {
        write::array(dest, value.wire_iter(), |dest, item| self.1.write(dest, item))
    }
}

/// A borrowed container read and written as an array limited by `C`.
///
/// Unlike a bare container the wrapped array is always written, even when
/// empty, and is required on read unless wrapped in
/// [`optional_field`](crate::optional_field).
#[derive(Debug)]
pub struct Array<T, C, E = Direct> {
    value: T,
    constraint: PhantomData<C>,
    elements: E,
}

/// Wraps `value` as an array limited by `constraint`.
pub fn array<T, C: ArrayConstraint>(value: T, _constraint: C) -> Array<T, C> {
    Array {
        value,
        constraint: PhantomData,
        elements: Direct,
    }
}

/// Like [`array`], with an explicit element codec such as [`Nested`].
pub fn array_of<T, C: ArrayConstraint, E>(
    value: T,
    _constraint: C,
    elements: E,
) -> Array<T, C, E> {
    Array {
        value,
        constraint: PhantomData,
        elements,
    }
}

impl<T, C, E> WireSchema for Array<T, C, E>
where
    T: Deref,
    T::Target: WireArray,
{
    const KIND: WireKind = WireKind::Array;

    fn is_empty(&self) -> bool {
        self.value.wire_len() == 0
    }
}

impl<'a, A, C, E> ReadBytes for Array<&'a mut A, C, E>
where
    A: WireArray + ?Sized,
    C: ArrayConstraint,
    E: ReadElement<A::Element>,
{
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        const {
            assert!(
                C::MIN_ELEMENT_SIZE != 0 || C::MAX_ELEMENT_COUNT != usize::MAX,
                "array constraint must bound the element size or the element count"
            )
        };
        read::array(
            source,
            &mut *self.value,
            C::MIN_ELEMENT_SIZE,
            C::MAX_ELEMENT_COUNT,
            &self.elements,
        )
    }

    fn reset(&mut self) {
        self.value.wire_clear();
    }
}

impl<'a, A, C, E> WriteBytes for Array<&'a A, C, E>
where
    A: WireArray + ?Sized,
    E: WriteElement<A::Element>,
{
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        write::array(dest, self.value.wire_iter(), |dest, item| {
            self.elements.write(dest, item)
        })
    }
}
