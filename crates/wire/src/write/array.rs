use crate::error::Result;

use super::Writer;

/// Writes every item of `items` as one array, encoding each with `write`.
///
/// The element count is only computed when the writer asks for it.
pub fn array<W, I, F>(dest: &mut W, items: I, mut write: F) -> Result<()>
where
    W: Writer + ?Sized,
    I: Iterator + Clone,
    F: FnMut(&mut W, I::Item) -> Result<()>,
{
    let count = if dest.need_array_size() {
        items.clone().count()
    } else {
        0
    };
    dest.start_array(count)?;
    for item in items {
        write(dest, item)?;
    }
    dest.end_array()
}
