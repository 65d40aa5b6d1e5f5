//! Fixed-size values written as binary.

use std::ops::Deref;

use crate::error::Result;
use crate::read::{ReadBytes, Reader};
use crate::traits::{Blob, WireKind, WireSchema};
use crate::write::{WriteBytes, Writer};

/// Reads exactly `T::SIZE` bytes of binary into `dest`.
pub fn read_blob<R, T>(source: &mut R, dest: &mut T) -> Result<()>
where
    R: Reader + ?Sized,
    T: Blob,
{
    let mut bytes = vec![0u8; T::SIZE];
    source.binary_into(&mut bytes, true)?;
    *dest = T::from_wire(&bytes);
    Ok(())
}

pub fn write_blob<W, T>(dest: &mut W, value: &T) -> Result<()>
where
    W: Writer + ?Sized,
    T: Blob,
{
    let mut bytes = Vec::with_capacity(T::SIZE);
    value.to_wire(&mut bytes);
    dest.binary(&bytes)
}

#[derive(Debug)]
pub struct BlobField<T> {
    value: T,
}

/// Treats any [`Blob`] (for example a `u32`) as fixed-size binary.
pub fn blob<T>(value: T) -> BlobField<T> {
    BlobField { value }
}

impl<T> WireSchema for BlobField<T>
where
    T: Deref,
    T::Target: Blob,
{
    const KIND: WireKind = WireKind::Binary;
    const FIXED_SIZE: Option<usize> = Some(<T::Target as Blob>::SIZE);
}

impl<'a, T: Blob + Default> ReadBytes for BlobField<&'a mut T> {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        read_blob(source, &mut *self.value)
    }

    fn reset(&mut self) {
        *self.value = T::default();
    }
}

impl<'a, T: Blob> WriteBytes for BlobField<&'a T> {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        write_blob(dest, self.value)
    }
}

/// Makes a [`Blob`] type a binary value that can be used as a field or an
/// array element.
///
/// ```
/// use wire::{declare_blob, Blob, Format, Json};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Hash([u8; 4]);
///
/// impl Blob for Hash {
///     const SIZE: usize = 4;
///
///     fn from_wire(bytes: &[u8]) -> Self {
///         Hash(<[u8; 4]>::from_wire(bytes))
///     }
///
///     fn to_wire(&self, out: &mut Vec<u8>) {
///         out.extend_from_slice(&self.0);
///     }
/// }
///
/// declare_blob!(Hash);
///
/// let bytes = Json::to_bytes(&vec![Hash([0xde, 0xad, 0xbe, 0xef])]).unwrap();
/// assert_eq!(bytes, br#"["deadbeef"]"#);
/// ```
#[macro_export]
macro_rules! declare_blob {
    ($ty:ty) => {
        impl $crate::WireSchema for $ty {
            const KIND: $crate::WireKind = $crate::WireKind::Binary;
            const FIXED_SIZE: ::core::option::Option<usize> =
                ::core::option::Option::Some(<$ty as $crate::Blob>::SIZE);
        }

        impl $crate::ArrayElement for $ty {}

        impl $crate::ReadBytes for $ty {
            fn read_bytes<R: $crate::Reader + ?Sized>(
                &mut self,
                source: &mut R,
            ) -> $crate::Result<()> {
                $crate::wrapper::read_blob(source, self)
            }

            fn reset(&mut self) {
                *self = <$ty as ::core::default::Default>::default();
            }
        }

        impl $crate::WriteBytes for $ty {
            fn write_bytes<W: $crate::Writer + ?Sized>(&self, dest: &mut W) -> $crate::Result<()> {
                $crate::wrapper::write_blob(dest, self)
            }
        }
    };
}
