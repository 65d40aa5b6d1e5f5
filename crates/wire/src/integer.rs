//! Range checked integer narrowing.
//!
//! Readers hand out 64-bit values; these helpers narrow them to the
//! destination type. A value above the destination's maximum fails with
//! [`Schema::SmallerInteger`] (the wire should have carried a smaller
//! integer), a value below its minimum with [`Schema::LargerInteger`].

use std::any::type_name;

use crate::error::{fail, Result, Schema};

/// Narrows a signed 64-bit value into `T`.
pub fn cast_signed<T: TryFrom<i64>>(value: i64) -> Result<T> {
    match T::try_from(value) {
        Ok(out) => Ok(out),
        // A value that does not fit and is negative must be below T::MIN.
        Err(_) if value < 0 => fail(
            Schema::LargerInteger,
            format_args!("{value} is below the minimum of {}", type_name::<T>()),
        ),
        Err(_) => fail(
            Schema::SmallerInteger,
            format_args!("{value} exceeds the maximum of {}", type_name::<T>()),
        ),
    }
}

/// Narrows an unsigned 64-bit value into `T`.
pub fn cast_unsigned<T: TryFrom<u64>>(value: u64) -> Result<T> {
    match T::try_from(value) {
        Ok(out) => Ok(out),
        Err(_) => fail(
            Schema::SmallerInteger,
            format_args!("{value} exceeds the maximum of {}", type_name::<T>()),
        ),
    }
}
