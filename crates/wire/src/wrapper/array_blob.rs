//! A container of fixed-size blobs carried as one binary value.

use std::ops::Deref;

use crate::error::{fail, Result, Schema};
use crate::read::{ReadBytes, Reader};
use crate::traits::{Blob, WireArray, WireKind, WireSchema};
use crate::write::{WriteBytes, Writer};

#[derive(Debug)]
pub struct ArrayAsBlob<T> {
    value: T,
}

/// Encodes every element of the wrapped container back to back in a single
/// binary value. An empty container is omitted from its object.
pub fn array_as_blob<T>(value: T) -> ArrayAsBlob<T> {
    ArrayAsBlob { value }
}

/// Splits `bytes` into `Blob::SIZE` chunks and stores them in `dest`.
///
/// Fails with [`Schema::FixedBinary`] when the length is not a multiple of
/// the element size.
pub fn read_as_blob<A>(bytes: &[u8], dest: &mut A) -> Result<()>
where
    A: WireArray + ?Sized,
    A::Element: Blob,
{
    let size = <A::Element as Blob>::SIZE;
    if size == 0 || bytes.len() % size != 0 {
        return fail(
            Schema::FixedBinary,
            format_args!("{} bytes is not a multiple of {size}", bytes.len()),
        );
    }
    dest.wire_clear();
    dest.wire_reserve(bytes.len() / size);
    for chunk in bytes.chunks_exact(size) {
        dest.wire_insert(|element| {
            *element = A::Element::from_wire(chunk);
            Ok(())
        })?;
    }
    Ok(())
}

impl<T> WireSchema for ArrayAsBlob<T>
where
    T: Deref,
    T::Target: WireArray,
{
    const KIND: WireKind = WireKind::Binary;
    const OPTIONAL_ON_EMPTY: bool = true;

    fn is_empty(&self) -> bool {
        self.value.wire_len() == 0
    }
}

impl<'a, A> ReadBytes for ArrayAsBlob<&'a mut A>
where
    A: WireArray + ?Sized,
    A::Element: Blob,
{
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        let bytes = source.binary()?;
        read_as_blob(&bytes, &mut *self.value)
    }

    fn reset(&mut self) {
        self.value.wire_clear();
    }
}

impl<'a, A> WriteBytes for ArrayAsBlob<&'a A>
where
    A: WireArray + ?Sized,
    A::Element: Blob,
{
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        let mut bytes = Vec::with_capacity(self.value.wire_len() * <A::Element as Blob>::SIZE);
        for element in self.value.wire_iter() {
            element.to_wire(&mut bytes);
        }
        dest.binary(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WireError;

    #[test]
    fn splits_into_elements() {
        let mut out: Vec<u32> = vec![9];
        read_as_blob(&[1, 0, 0, 0, 2, 0, 0, 0], &mut out).unwrap();
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn rejects_partial_elements() {
        let mut out: Vec<[u8; 4]> = Vec::new();
        assert_eq!(
            read_as_blob(&[1, 2, 3, 4, 5], &mut out),
            Err(WireError::Schema(Schema::FixedBinary))
        );
    }

    #[test]
    fn empty_input_clears() {
        let mut out: Vec<u16> = vec![1, 2];
        read_as_blob(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
