mod common;

use std::collections::BTreeSet;

use common::*;
use wire::wrapper::{array, read_as_blob};
use wire::{
    declare_blob, field, read, wire_object, write, Blob, EpeeBin, Format, Json, MinElementSize,
    ReadBytes, Reader, Result, Schema, WireError, WireKind, WireSchema, WriteBytes, Writer,
};

/// Strings whose elements must average at least `MIN` input bytes.
#[derive(Debug, Default, PartialEq)]
struct Limits<const MIN: usize> {
    strings: Vec<String>,
}

impl<const MIN: usize> WireSchema for Limits<MIN> {
    const KIND: WireKind = WireKind::Object;
}

impl<const MIN: usize> ReadBytes for Limits<MIN> {
    fn read_bytes<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        read::object(
            source,
            &mut [&mut field(
                "strings",
                array(&mut self.strings, MinElementSize::<MIN>),
            )],
        )
    }
}

impl<const MIN: usize> WriteBytes for Limits<MIN> {
    fn write_bytes<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        write::object(
            dest,
            &[&field("strings", array(&self.strings, MinElementSize::<MIN>))],
        )
    }
}

fn four_strings<const MIN: usize>() -> Limits<MIN> {
    Limits {
        strings: (1..=4).map(|n| format!("string{n}")).collect(),
    }
}

fn rejected<F: Format>(value: &Complex) -> Option<Schema> {
    let bytes = F::to_bytes(value).unwrap();
    F::decode::<Complex>(&bytes).unwrap_err().schema()
}

#[test]
fn epee_min_element_size() {
    // each element is a one byte length and seven characters
    let bytes = EpeeBin::to_bytes(&four_strings::<8>()).unwrap();
    assert_eq!(EpeeBin::decode::<Limits<8>>(&bytes).unwrap(), four_strings());
    assert_eq!(
        EpeeBin::decode::<Limits<9>>(&bytes).unwrap_err(),
        WireError::Schema(Schema::ArrayMinSize)
    );
}

#[test]
fn json_min_element_size() {
    // nine bytes per quoted element, separators excluded
    let bytes = Json::to_bytes(&four_strings::<9>()).unwrap();
    assert_eq!(
        bytes,
        br#"{"strings":["string1","string2","string3","string4"]}"#
    );
    assert_eq!(Json::decode::<Limits<9>>(&bytes).unwrap(), four_strings());
    assert_eq!(
        Json::decode::<Limits<10>>(&bytes).unwrap_err(),
        WireError::Schema(Schema::ArrayMinSize)
    );
}

#[test]
fn max_element_count() {
    let mut complex = filled_complex();
    complex.objects.push(Inner { left: 1, right: 1 });
    assert_eq!(rejected::<Json>(&complex), Some(Schema::ArrayMaxElement));
    assert_eq!(rejected::<EpeeBin>(&complex), Some(Schema::ArrayMaxElement));
}

#[test]
fn nested_limits() {
    let cases = [
        vec![vec![], vec![]],
        vec![vec![vec![1], vec![2], vec![3]]],
        vec![vec![vec![1, 2, 3, 4, 5]]],
    ];
    for uints in cases {
        let complex = Complex {
            uints,
            ..filled_complex()
        };
        assert_eq!(rejected::<Json>(&complex), Some(Schema::ArrayMaxElement));
        assert_eq!(rejected::<EpeeBin>(&complex), Some(Schema::ArrayMaxElement));
    }

    let complex = Complex {
        uints: vec![vec![vec![1, 2, 3, 4], vec![]]],
        ..filled_complex()
    };
    roundtrip::<Json, _>(&complex);
    roundtrip::<EpeeBin, _>(&complex);
}

#[test]
fn claimed_counts_must_fit_the_input() {
    // an epee array claiming more u32 values than bytes remain
    let bytes = storage(&[0x04, 0x03, b'i', b'd', b's', 0x86, 0x40, 1, 0, 0, 0]);

    #[derive(Debug, Default, PartialEq)]
    struct Ids {
        ids: Vec<u32>,
    }
    wire_object!(Ids { ids });

    assert_eq!(
        EpeeBin::decode::<Ids>(&bytes).unwrap_err(),
        WireError::Schema(Schema::ArrayMinSize)
    );
}

/// A blob much larger than the smallest encoding of an empty string.
#[derive(Debug, Default, PartialEq)]
struct Page(Vec<u8>);

impl Blob for Page {
    const SIZE: usize = 4096;

    fn from_wire(bytes: &[u8]) -> Self {
        Page(bytes.to_vec())
    }

    fn to_wire(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

declare_blob!(Page);

#[derive(Debug, Default, PartialEq)]
struct Pages {
    pages: Vec<Page>,
}

wire_object!(Pages { pages });

#[test]
fn fixed_blob_elements_must_carry_their_payload() {
    // 4000 empty strings claimed as 4096 byte pages
    let mut bytes = storage(&[0x04, 0x05, b'p', b'a', b'g', b'e', b's', 0x8a, 0x81, 0x3e]);
    bytes.extend(std::iter::repeat(0u8).take(4000));

    let mut pages = Pages::default();
    assert_eq!(
        EpeeBin::from_bytes(&bytes, &mut pages).unwrap_err(),
        WireError::Schema(Schema::ArrayMinSize)
    );
    assert_eq!(pages.pages.capacity(), 0);

    let pages = Pages {
        pages: vec![Page(vec![7; 4096])],
    };
    roundtrip::<EpeeBin, _>(&pages);
    roundtrip::<Json, _>(&pages);
}

#[test]
fn reservations_are_bounded_by_the_input() {
    #[derive(Debug, Default, PartialEq)]
    struct Rows {
        rows: Vec<Inner>,
    }
    wire_object!(Rows { rows });

    // 4000 empty objects, each one byte
    let mut bytes = storage(&[0x04, 0x04, b'r', b'o', b'w', b's', 0x8c, 0x81, 0x3e]);
    bytes.extend(std::iter::repeat(0u8).take(4000));

    let mut rows = Rows::default();
    let error = EpeeBin::from_bytes(&bytes, &mut rows).unwrap_err();
    assert!(matches!(error, WireError::MissingKeys(_)), "{error:?}");
    assert!(rows.rows.capacity() * std::mem::size_of::<Inner>() <= bytes.len());
}

#[test]
fn sets_collapse_duplicates() {
    #[derive(Debug, Default, PartialEq)]
    struct Ids {
        ids: BTreeSet<u32>,
    }
    wire_object!(Ids { ids });

    let ids: Ids = Json::decode(br#"{"ids":[5,3,5,1]}"#).unwrap();
    assert_eq!(ids.ids.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    assert_eq!(Json::to_bytes(&ids).unwrap(), br#"{"ids":[1,3,5]}"#);
}

#[test]
fn blobs_split_on_element_size() {
    let mut blobs: Vec<SmallBlob> = Vec::new();
    read_as_blob(&[0xde, 0xad, 0xbe, 0xef, 1, 2, 3, 4], &mut blobs).unwrap();
    assert_eq!(
        blobs,
        vec![SmallBlob([0xde, 0xad, 0xbe, 0xef]), SmallBlob([1, 2, 3, 4])]
    );

    let text = COMPLEX_FILLED_JSON.replace(
        r#""vector_blobs":"00ff2211117f7e80deadbeef""#,
        r#""vector_blobs":"00ff2211117f7e80deadbe""#,
    );
    assert_eq!(
        Json::decode::<Complex>(text.as_bytes()).unwrap_err(),
        WireError::Schema(Schema::FixedBinary)
    );

    // an absent blob array comes back empty
    let text = COMPLEX_FILLED_JSON.replace(
        r#""list_blobs":"00ff2211117f7e80deadbeef","#,
        "",
    );
    let complex: Complex = Json::decode(text.as_bytes()).unwrap();
    assert!(complex.list_blobs.is_empty());
}
