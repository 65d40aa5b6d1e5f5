#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt::Debug;

use wire::wrapper::{Direct, Nested};
use wire::{
    declare_blob, wire_object, wire_variant, BasicValue, Blob, Format, MaxElementCount,
    MinElementSize, ReadBytes, WriteBytes,
};

pub const EPEE_HEADER: [u8; 9] = [0x01, 0x11, 0x01, 0x01, 0x01, 0x01, 0x02, 0x01, 0x01];

/// Portable storage header followed by `body`.
pub fn storage(body: &[u8]) -> Vec<u8> {
    let mut out = EPEE_HEADER.to_vec();
    out.extend_from_slice(body);
    out
}

pub fn roundtrip<F, T>(value: &T) -> T
where
    F: Format,
    T: ReadBytes + WriteBytes + Default + PartialEq + Debug,
{
    let bytes = F::to_bytes(value).unwrap();
    let decoded: T = F::decode(&bytes).unwrap();
    assert_eq!(&decoded, value, "{} round trip", F::ID);
    decoded
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SmallBlob(pub [u8; 4]);

impl Blob for SmallBlob {
    const SIZE: usize = 4;

    fn from_wire(bytes: &[u8]) -> Self {
        SmallBlob(<[u8; 4]>::from_wire(bytes))
    }

    fn to_wire(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

declare_blob!(SmallBlob);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inner {
    pub left: u32,
    pub right: u32,
}

wire_object!(Inner { left, right });

#[derive(Debug, Clone, PartialEq)]
pub enum StringOrInt {
    Str(String),
    Int(i32),
}

impl Default for StringOrInt {
    fn default() -> Self {
        StringOrInt::Int(0)
    }
}

wire_variant!(StringOrInt {
    "a_string" => Str(String),
    "a_int" => Int(i32),
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Complex {
    pub objects: Vec<Inner>,
    pub ints: Vec<i16>,
    pub uints: Vec<Vec<Vec<u64>>>,
    pub blobs: Vec<SmallBlob>,
    pub vector_blobs: Vec<SmallBlob>,
    pub list_blobs: VecDeque<SmallBlob>,
    pub strings: Vec<String>,
    pub string: String,
    pub any: Option<BasicValue>,
    pub string_or_int: StringOrInt,
    pub real: f64,
    pub uint8: u8,
    pub int8: i8,
    pub choice: bool,
}

wire_object!(Complex {
    objects: optional array(MaxElementCount::<3>),
    ints,
    uints: array_of(
        MaxElementCount::<1>,
        Nested(MaxElementCount::<2>, Nested(MaxElementCount::<4>, Direct))
    ),
    blobs,
    vector_blobs: array_as_blob(),
    list_blobs: array_as_blob(),
    strings: optional array(MinElementSize::<7>),
    string,
    any: optional,
    string_or_int,
    real,
    uint8: defaulted(100u8),
    int8,
    choice,
});

pub const COMPLEX_EMPTY_JSON: &str = r#"{"uints":[],"string":"","string_or_int":{"a_int":0},"real":0.0,"uint8":0,"int8":0,"choice":false}"#;

pub const COMPLEX_FILLED_JSON: &str = concat!(
    r#"{"objects":[{"left":0,"right":4294967295},{"left":100,"right":200},{"left":44444,"right":83434}],"#,
    r#""ints":[-32768,0,31234,32767],"#,
    r#""uints":[[[0,18446744073709551615,34234234,33],[977]]],"#,
    r#""blobs":["00ff2211","117f7e80","deadbeef"],"#,
    r#""vector_blobs":"00ff2211117f7e80deadbeef","#,
    r#""list_blobs":"00ff2211117f7e80deadbeef","#,
    r#""strings":["string1","string2","string3","string4"],"#,
    r#""string":"simple_string","#,
    r#""any":-9223372036854775808,"#,
    r#""string_or_int":{"a_string":"variant_string"},"#,
    r#""real":2.43,"uint8":255,"int8":-128,"choice":true}"#,
);

pub fn sample_blobs() -> Vec<SmallBlob> {
    vec![
        SmallBlob([0x00, 0xff, 0x22, 0x11]),
        SmallBlob([0x11, 0x7f, 0x7e, 0x80]),
        SmallBlob([0xde, 0xad, 0xbe, 0xef]),
    ]
}

pub fn filled_complex() -> Complex {
    Complex {
        objects: vec![
            Inner {
                left: 0,
                right: u32::MAX,
            },
            Inner {
                left: 100,
                right: 200,
            },
            Inner {
                left: 44444,
                right: 83434,
            },
        ],
        ints: vec![i16::MIN, 0, 31234, i16::MAX],
        uints: vec![vec![vec![0, u64::MAX, 34234234, 33], vec![977]]],
        blobs: sample_blobs(),
        vector_blobs: sample_blobs(),
        list_blobs: sample_blobs().into(),
        strings: (1..=4).map(|n| format!("string{n}")).collect(),
        string: "simple_string".to_owned(),
        any: Some(BasicValue::Integer(i64::MIN)),
        string_or_int: StringOrInt::Str("variant_string".to_owned()),
        real: 2.43,
        uint8: u8::MAX,
        int8: i8::MIN,
        choice: true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Memo {
    Text(String),
    Code(u64),
}

impl Default for Memo {
    fn default() -> Self {
        Memo::Code(0)
    }
}

wire_variant!(Memo {
    "text" => Text(String),
    "code" => Code(u64),
});

/// Holds unions inline: their option names are keys of this object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payment {
    pub id: u32,
    pub amount: StringOrInt,
    pub memo: Option<Memo>,
}

wire_object!(Payment {
    id,
    amount: variant,
    memo: optional_variant,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    pub children: Vec<Tree>,
}

wire_object!(Tree { children });

/// A chain of `levels` nested trees.
pub fn deep_tree(levels: usize) -> Tree {
    let mut tree = Tree::default();
    for _ in 1..levels {
        tree = Tree {
            children: vec![tree],
        };
    }
    tree
}
