//! Object member descriptors.
//!
//! A [`Field`] binds a wire name to a borrowed value (or a wrapper around
//! one) and says whether the member is required. Object readers and
//! writers take their members as slices of [`ReadField`] / [`WriteField`]
//! trait objects so that one driver handles every object shape.

use std::slice;

use crate::error::Result;
use crate::read::{ReadBytes, Reader};
use crate::traits::WireSchema;
use crate::write::{WriteBytes, Writer};

/// One named member of an object.
#[derive(Debug, Clone, Copy)]
pub struct Field<T> {
    pub name: &'static str,
    pub value: T,
    required: bool,
}

/// A required member.
pub fn field<T>(name: &'static str, value: T) -> Field<T> {
    Field {
        name,
        value,
        required: true,
    }
}

/// A member that may be absent. Absent on read resets the value.
pub fn optional_field<T>(name: &'static str, value: T) -> Field<T> {
    Field {
        name,
        value,
        required: false,
    }
}

impl<T: WireSchema> Field<T> {
    /// Required on read: declared required and not optional-on-empty.
    pub fn is_required(&self) -> bool {
        self.required && !T::OPTIONAL_ON_EMPTY
    }

    /// Whether the member is emitted on write.
    pub fn is_available(&self) -> bool {
        if self.required {
            self.is_required() || !self.value.is_empty()
        } else {
            !self.value.is_empty()
        }
    }
}

/// Object member as seen by [`read::object`](crate::read::object).
pub trait ReadField<R: Reader + ?Sized> {
    /// Wire names this member answers to. Plain members have one, inline
    /// variants one per option.
    fn names(&self) -> &[&'static str];

    fn is_required(&self) -> bool;

    /// Decodes the value for the key `names()[option]`.
    fn read(&mut self, source: &mut R, option: usize) -> Result<()>;

    /// Called when an optional member was absent.
    fn reset(&mut self);
}

/// Object member as seen by [`write::object`](crate::write::object).
pub trait WriteField<W: Writer + ?Sized> {
    fn is_available(&self) -> bool;

    /// Writes the key and the value.
    fn write(&self, dest: &mut W) -> Result<()>;
}

impl<R, T> ReadField<R> for Field<T>
where
    R: Reader + ?Sized,
    T: ReadBytes,
{
    fn names(&self) -> &[&'static str] {
        slice::from_ref(&self.name)
    }

    fn is_required(&self) -> bool {
        Field::is_required(self)
    }

    fn read(&mut self, source: &mut R, _option: usize) -> Result<()> {
        self.value.read_bytes(source)
    }

    fn reset(&mut self) {
        self.value.reset();
    }
}

impl<W, T> WriteField<W> for Field<T>
where
    W: Writer + ?Sized,
    T: WriteBytes,
{
    fn is_available(&self) -> bool {
        Field::is_available(self)
    }

    fn write(&self, dest: &mut W) -> Result<()> {
        dest.key(self.name)?;
        self.value.write_bytes(dest)
    }
}
