use crate::error::Result;
use crate::field::WriteField;

use super::Writer;

/// Writes one object holding every available field of `fields`, in order.
pub fn object<W>(dest: &mut W, fields: &[&dyn WriteField<W>]) -> Result<()>
where
    W: Writer + ?Sized,
{
    let count = fields.iter().filter(|field| field.is_available()).count();
    dest.start_object(count)?;
    for field in fields {
        if field.is_available() {
            field.write(dest)?;
        }
    }
    dest.end_object()
}
