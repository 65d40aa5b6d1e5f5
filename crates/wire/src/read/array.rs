use crate::error::{fail, Result, Schema};
use crate::traits::WireArray;
use crate::wrapper::ReadElement;

use super::Reader;

/// Reads one array into `dest`, replacing its contents.
///
/// Two limits guard against inputs that claim more elements than they
/// carry: the element count may not exceed `max_element_count`, and after
/// every element the bytes consumed so far divided by the elements read
/// must be at least `min_element_size`.
pub fn array<R, A, E>(
    source: &mut R,
    dest: &mut A,
    min_element_size: usize,
    max_element_count: usize,
    elements: &E,
) -> Result<()>
where
    R: Reader + ?Sized,
    A: WireArray + ?Sized,
    E: ReadElement<A::Element>,
{
    let mut count = source.start_array(min_element_size)?;
    if max_element_count < count {
        return fail(
            Schema::ArrayMaxElement,
            format_args!("{count} elements, at most {max_element_count} allowed"),
        );
    }

    dest.wire_clear();
    // Never reserve more memory than the input could fill.
    let element_size = std::mem::size_of::<A::Element>().max(1);
    dest.wire_reserve(count.min(source.remaining() / element_size));

    let delimited = source.delimited_arrays();
    let start = source.remaining();
    let mut more = count != 0;
    let mut read = 0usize;
    while more || !source.is_array_end(count)? {
        if delimited && max_element_count <= read {
            return fail(
                Schema::ArrayMaxElement,
                format_args!("more than {max_element_count} elements"),
            );
        }

        dest.wire_insert(|element| elements.read(source, element))?;
        read += 1;
        count = count.wrapping_sub(1);
        more &= count != 0;

        let consumed = start - source.remaining();
        if consumed / read < min_element_size {
            return fail(
                Schema::ArrayMinSize,
                format_args!(
                    "{read} elements in {consumed} bytes, at least {min_element_size} bytes each expected"
                ),
            );
        }
    }

    source.end_array();
    Ok(())
}
