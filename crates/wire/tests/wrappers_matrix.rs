mod common;

use common::roundtrip;
use wire::wrapper::range;
use wire::{
    field, read, wire_object, write, EpeeBin, Format, Json, ReadBytes, Reader, Result, Schema,
    WireError, WireKind, WireSchema, WriteBytes, Writer,
};

#[derive(Debug, Default, PartialEq)]
struct Header {
    nonce: u32,
    version: u8,
    flags: Option<u16>,
}

wire_object!(Header {
    nonce: blob(),
    version: defaulted(1u8),
    flags: optional,
});

/// Written from a generated sequence, read back into a vector.
#[derive(Debug, Default, PartialEq)]
struct Squares {
    limit: u32,
    squares: Vec<u32>,
}

impl WireSchema for Squares {
    const KIND: WireKind = WireKind::Object;
}

impl ReadBytes for Squares {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        read::object(
            source,
            &mut [
                &mut field("limit", &mut self.limit),
                &mut field("squares", &mut self.squares),
            ],
        )
    }
}

impl WriteBytes for Squares {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        write::object(
            dest,
            &[
                &field("limit", &self.limit),
                &field("squares", range((1..=self.limit).map(|n| n * n))),
            ],
        )
    }
}

#[test]
fn blobs_are_little_endian_binary() {
    let header = Header {
        nonce: 0x0102_0304,
        version: 2,
        flags: None,
    };
    assert_eq!(
        Json::to_bytes(&header).unwrap(),
        br#"{"nonce":"04030201","version":2}"#
    );
    roundtrip::<Json, _>(&header);
    roundtrip::<EpeeBin, _>(&header);

    assert_eq!(
        Json::decode::<Header>(br#"{"nonce":"040302"}"#).unwrap_err(),
        WireError::Schema(Schema::FixedBinary)
    );
}

#[test]
fn defaulted_values_are_omitted() {
    let header = Header {
        nonce: 0,
        version: 1,
        flags: Some(3),
    };
    assert_eq!(
        Json::to_bytes(&header).unwrap(),
        br#"{"nonce":"00000000","flags":3}"#
    );

    let mut decoded = Header {
        version: 9,
        flags: Some(4),
        ..Header::default()
    };
    Json::from_bytes(br#"{"nonce":"00000000"}"#, &mut decoded).unwrap();
    assert_eq!(
        decoded,
        Header {
            nonce: 0,
            version: 1,
            flags: None,
        }
    );
}

#[test]
fn ranges_write_without_collecting() {
    let squares = Squares {
        limit: 4,
        squares: Vec::new(),
    };
    let bytes = Json::to_bytes(&squares).unwrap();
    assert_eq!(bytes, br#"{"limit":4,"squares":[1,4,9,16]}"#);

    let decoded: Squares = Json::decode(&bytes).unwrap();
    assert_eq!(decoded.squares, vec![1, 4, 9, 16]);

    let bytes = EpeeBin::to_bytes(&squares).unwrap();
    let decoded: Squares = EpeeBin::decode(&bytes).unwrap();
    assert_eq!(decoded.squares, vec![1, 4, 9, 16]);
}

#[test]
fn empty_ranges_are_still_written() {
    let bytes = Json::to_bytes(&Squares::default()).unwrap();
    assert_eq!(bytes, br#"{"limit":0,"squares":[]}"#);
}
