//! Portable storage framing constants and type tags.

use wire_buffers::{ByteStream, Span};

use super::error::EpeeError;

pub const SIGNATURE_A: u32 = 0x0101_1101;
pub const SIGNATURE_B: u32 = 0x0102_0101;
pub const FORMAT_VERSION: u8 = 1;
pub const HEADER_SIZE: usize = 9;

/// Set on a tag when the value is an array of the tagged kind.
pub const FLAG_ARRAY: u8 = 0x80;

const SIZE_MARK_MASK: u8 = 0x03;
const SIZE_MARK_BYTE: u8 = 0;
const SIZE_MARK_WORD: u8 = 1;
const SIZE_MARK_DWORD: u8 = 2;
const SIZE_MARK_INT64: u8 = 3;

/// Largest value a varint can carry.
pub const MAX_VARINT: u64 = u64::MAX >> 2;

/// Value kind carried in the low seven bits of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Int64 = 1,
    Int32 = 2,
    Int16 = 3,
    Int8 = 4,
    Uint64 = 5,
    Uint32 = 6,
    Uint16 = 7,
    Uint8 = 8,
    Double = 9,
    String = 10,
    Bool = 11,
    Object = 12,
    Array = 13,
}

impl Kind {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Kind::Int64,
            2 => Kind::Int32,
            3 => Kind::Int16,
            4 => Kind::Int8,
            5 => Kind::Uint64,
            6 => Kind::Uint32,
            7 => Kind::Uint16,
            8 => Kind::Uint8,
            9 => Kind::Double,
            10 => Kind::String,
            11 => Kind::Bool,
            12 => Kind::Object,
            13 => Kind::Array,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Smallest encoding of one untagged value of this kind. Never zero.
    pub fn min_wire_size(self) -> usize {
        match self {
            Kind::Int64 | Kind::Uint64 | Kind::Double => 8,
            Kind::Int32 | Kind::Uint32 => 4,
            Kind::Int16 | Kind::Uint16 => 2,
            Kind::Int8 | Kind::Uint8 | Kind::Bool => 1,
            // varint length / varint field count
            Kind::String | Kind::Object => 1,
            // inner tag + varint count
            Kind::Array => 2,
        }
    }
}

/// A decoded type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub kind: Kind,
    pub array: bool,
}

impl Tag {
    pub const OBJECT: Tag = Tag::scalar(Kind::Object);
    pub const ARRAY: Tag = Tag::scalar(Kind::Array);

    pub const fn scalar(kind: Kind) -> Self {
        Tag { kind, array: false }
    }

    pub const fn array_of(kind: Kind) -> Self {
        Tag { kind, array: true }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Kind::from_code(byte & !FLAG_ARRAY).map(|kind| Tag {
            kind,
            array: byte & FLAG_ARRAY != 0,
        })
    }

    pub fn to_byte(self) -> u8 {
        if self.array {
            self.kind.code() | FLAG_ARRAY
        } else {
            self.kind.code()
        }
    }

    /// Arrays and the bare array kind used for elements of nested arrays.
    pub fn is_array_like(self) -> bool {
        self.array || self.kind == Kind::Array
    }
}

/// Encoded size of `value` as a varint.
pub fn varint_width(value: u64) -> usize {
    match value {
        0..=0x3f => 1,
        0x40..=0x3fff => 2,
        0x4000..=0x3fff_ffff => 4,
        _ => 8,
    }
}

/// Appends `value` as a varint: the low two bits of the first byte select a
/// 1, 2, 4 or 8 byte little-endian word holding `value << 2`.
pub fn write_varint(out: &mut ByteStream, value: u64) -> Result<(), EpeeError> {
    if value <= 0x3f {
        out.put((value << 2) as u8 | SIZE_MARK_BYTE);
    } else if value <= 0x3fff {
        out.u16_le((value << 2) as u16 | u16::from(SIZE_MARK_WORD));
    } else if value <= 0x3fff_ffff {
        out.u32_le((value << 2) as u32 | u32::from(SIZE_MARK_DWORD));
    } else if value <= MAX_VARINT {
        out.u64_le((value << 2) | u64::from(SIZE_MARK_INT64));
    } else {
        return Err(EpeeError::VarintOverflow(value));
    }
    Ok(())
}

pub fn read_varint(source: &mut Span<'_>) -> Result<u64, EpeeError> {
    let first = source.first().ok_or(EpeeError::NotEnoughBytes("varint"))?;
    let raw = match first & SIZE_MARK_MASK {
        SIZE_MARK_BYTE => source.u8().map(u64::from),
        SIZE_MARK_WORD => source.u16_le().map(u64::from),
        SIZE_MARK_DWORD => source.u32_le().map(u64::from),
        _ => source.u64_le(),
    };
    raw.map(|value| value >> 2)
        .map_err(|_| EpeeError::NotEnoughBytes("varint"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> Vec<u8> {
        let mut out = ByteStream::new();
        write_varint(&mut out, value).unwrap();
        out.into_vec()
    }

    #[test]
    fn varint_width_boundaries() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(1), vec![0x04]);
        assert_eq!(encoded(63), vec![0xfc]);
        assert_eq!(encoded(64), vec![0x01, 0x01]);
        assert_eq!(encoded(16383), vec![0xfd, 0xff]);
        assert_eq!(encoded(16384), vec![0x02, 0x00, 0x01, 0x00]);
        assert_eq!(encoded(0x3fff_ffff), vec![0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(encoded(0x4000_0000).len(), 8);
        for value in [0, 63, 64, 16383, 16384, 0x3fff_ffff, 0x4000_0000] {
            assert_eq!(varint_width(value), encoded(value).len());
        }
        assert_eq!(
            write_varint(&mut ByteStream::new(), MAX_VARINT + 1),
            Err(EpeeError::VarintOverflow(MAX_VARINT + 1))
        );
    }

    #[test]
    fn varint_reads_back() {
        for value in [0, 63, 64, 300, 16383, 16384, 0x3fff_ffff, 0x4000_0000, MAX_VARINT] {
            let bytes = encoded(value);
            let mut span = Span::new(&bytes);
            assert_eq!(read_varint(&mut span), Ok(value));
            assert!(span.is_empty());
        }
    }

    #[test]
    fn truncated_varint() {
        let mut span = Span::new(&[0x01]);
        assert_eq!(
            read_varint(&mut span),
            Err(EpeeError::NotEnoughBytes("varint"))
        );
        assert_eq!(
            read_varint(&mut Span::new(&[])),
            Err(EpeeError::NotEnoughBytes("varint"))
        );
    }

    #[test]
    fn tags() {
        assert_eq!(Tag::from_byte(0x83), Some(Tag::array_of(Kind::Int16)));
        assert_eq!(Tag::from_byte(0x0c), Some(Tag::OBJECT));
        assert_eq!(Tag::from_byte(0x00), None);
        assert_eq!(Tag::from_byte(0x8e), None);
        assert_eq!(Tag::array_of(Kind::Uint8).to_byte(), 0x88);
        assert!(Tag::ARRAY.is_array_like());
        assert!(!Tag::OBJECT.is_array_like());
    }
}
