//! Values omitted when equal to a default.

use std::ops::Deref;

use crate::error::Result;
use crate::read::{ReadBytes, Reader};
use crate::traits::{WireKind, WireSchema};
use crate::write::{WriteBytes, Writer};

#[derive(Debug)]
pub struct Defaulted<T, D> {
    value: T,
    default: D,
}

/// Omits the value on write when it equals `default`, and restores
/// `default` when the field is absent on read.
pub fn defaulted<T, D>(value: T, default: D) -> Defaulted<T, D> {
    Defaulted { value, default }
}

impl<T, D> WireSchema for Defaulted<T, D>
where
    T: Deref<Target = D>,
    D: WireSchema + PartialEq,
{
    const KIND: WireKind = D::KIND;
    const OPTIONAL_ON_EMPTY: bool = true;

    fn is_empty(&self) -> bool {
        *self.value == self.default
    }
}

impl<'a, D> ReadBytes for Defaulted<&'a mut D, D>
where
    D: ReadBytes + PartialEq + Clone,
{
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        self.value.read_bytes(source)
    }

    fn reset(&mut self) {
        *self.value = self.default.clone();
    }
}

impl<'a, D> WriteBytes for Defaulted<&'a D, D>
where
    D: WriteBytes + PartialEq,
{
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        self.value.write_bytes(dest)
    }
}
