use crate::constants::MAX_SUBFIELDS;
use crate::error::{fail, Result, Schema, WireError};
use crate::field::ReadField;

use super::Reader;

/// Reads one object whose members are described by `fields`.
///
/// Keys may arrive in any order. A key seen twice, or two options of the
/// same variant, fails with [`Schema::InvalidKey`]. Absent required fields
/// fail with [`WireError::MissingKeys`] naming every one of them; absent
/// optional fields are reset.
pub fn object<R>(source: &mut R, fields: &mut [&mut dyn ReadField<R>]) -> Result<()>
where
    R: Reader + ?Sized,
{
    let total: usize = fields.iter().map(|field| field.names().len()).sum();
    if MAX_SUBFIELDS <= total {
        return fail(
            WireError::TooManyFields(total),
            format_args!("key table holds at most {} names", MAX_SUBFIELDS - 1),
        );
    }

    let mut state = source.start_object()?;

    let mut map: [&'static str; MAX_SUBFIELDS] = [""; MAX_SUBFIELDS];
    let mut first = [0usize; MAX_SUBFIELDS];
    let mut next = 0;
    for (slot, field) in fields.iter().enumerate() {
        first[slot] = next;
        for &name in field.names() {
            map[next] = name;
            next += 1;
        }
    }

    let mut seen = [false; MAX_SUBFIELDS];
    let mut required = fields.iter().filter(|field| field.is_required()).count();

    while let Some(index) = source.key(&map[..total], &mut state)? {
        let owner = fields
            .iter()
            .enumerate()
            .position(|(slot, field)| first[slot] <= index && index < first[slot] + field.names().len());
        let Some(slot) = owner else {
            return fail(
                Schema::InvalidKey,
                format_args!("reader returned key index {index} outside the table"),
            );
        };
        if seen[slot] {
            return fail(
                Schema::InvalidKey,
                format_args!("duplicate field `{}`", map[index]),
            );
        }
        fields[slot].read(source, index - first[slot])?;
        seen[slot] = true;
        if fields[slot].is_required() {
            required -= 1;
        }
    }

    if required != 0 {
        let missing: Vec<&'static str> = fields
            .iter()
            .zip(seen)
            .filter(|(field, seen)| field.is_required() && !seen)
            .flat_map(|(field, _)| field.names().iter().copied())
            .collect();
        return fail(
            WireError::MissingKeys(missing),
            format_args!("{required} required field(s) absent"),
        );
    }

    for (field, seen) in fields.iter_mut().zip(seen) {
        if !seen && !field.is_required() {
            field.reset();
        }
    }

    source.end_object();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::field;
    use crate::json::JsonReader;

    /// Reads `{}` against `count` required `u32` fields.
    fn read_fields(count: usize) -> Result<()> {
        let names: Vec<&'static str> = (0..count)
            .map(|n| &*Box::leak(format!("f{n}").into_boxed_str()))
            .collect();
        let mut values = vec![0u32; count];
        let mut fields: Vec<_> = names
            .iter()
            .zip(values.iter_mut())
            .map(|(&name, value)| field(name, value))
            .collect();
        let mut table: Vec<&mut dyn ReadField<JsonReader<'_>>> = fields
            .iter_mut()
            .map(|field| field as &mut dyn ReadField<JsonReader<'_>>)
            .collect();
        object(&mut JsonReader::new(b"{}"), &mut table[..])
    }

    #[test]
    fn key_table_is_bounded() {
        assert_eq!(
            read_fields(MAX_SUBFIELDS),
            Err(WireError::TooManyFields(MAX_SUBFIELDS))
        );
        match read_fields(MAX_SUBFIELDS - 1) {
            Err(WireError::MissingKeys(missing)) => assert_eq!(missing.len(), MAX_SUBFIELDS - 1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
