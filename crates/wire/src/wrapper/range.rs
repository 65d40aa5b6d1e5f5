//! Write-only arrays over arbitrary iterators.

use crate::error::Result;
use crate::traits::{WireKind, WireSchema};
use crate::write::{self, WriteBytes, Writer};

/// Writes the items of a cloneable iterator as an array, without
/// collecting them first.
///
/// ```
/// use wire::wrapper::range;
/// use wire::{Format, Json};
///
/// let squares = range((1u32..4).map(|n| n * n));
/// assert_eq!(Json::to_bytes(&squares).unwrap(), b"[1,4,9]");
/// ```
#[derive(Debug, Clone)]
pub struct Range<I> {
    items: I,
}

pub fn range<I>(items: I) -> Range<I>
where
    I: Iterator + Clone,
    I::Item: WriteBytes,
{
    Range { items }
}

impl<I> WireSchema for Range<I> {
    const KIND: WireKind = WireKind::Array;
}

impl<I> WriteBytes for Range<I>
where
    I: Iterator + Clone,
    I::Item: WriteBytes,
{
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        write::array(dest, self.items.clone(), |dest, item| item.write_bytes(dest))
    }
}
