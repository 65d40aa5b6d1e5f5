mod common;

use common::*;
use wire::json::{self, JsonError, JsonReader, JsonWriter};
use wire::{
    read, BasicValue, Format, Json, ReadBytes, ReadOptions, Reader, Schema, WireError,
    WriteBytes, Writer, MAX_READ_DEPTH,
};

fn decode<T: ReadBytes + Default>(text: &str) -> Result<T, WireError> {
    Json::decode(text.as_bytes())
}

fn schema_error<T: ReadBytes + Default + std::fmt::Debug>(text: &str) -> Option<Schema> {
    decode::<T>(text).unwrap_err().schema()
}

#[test]
fn complex_object_layout() {
    assert_eq!(json::to_string(&Complex::default()).unwrap(), COMPLEX_EMPTY_JSON);
    assert_eq!(json::to_string(&filled_complex()).unwrap(), COMPLEX_FILLED_JSON);

    let decoded: Complex = decode(COMPLEX_FILLED_JSON).unwrap();
    assert_eq!(decoded, filled_complex());

    // absent defaulted member comes back as its default
    let decoded: Complex = decode(COMPLEX_EMPTY_JSON).unwrap();
    assert_eq!(decoded.uint8, 0);
    let without_uint8 = COMPLEX_EMPTY_JSON.replace(r#""uint8":0,"#, "");
    let decoded: Complex = decode(&without_uint8).unwrap();
    assert_eq!(decoded.uint8, 100);
}

#[test]
fn complex_round_trips() {
    roundtrip::<Json, _>(&Complex::default());
    roundtrip::<Json, _>(&filled_complex());
}

#[test]
fn decoding_replaces_previous_contents() {
    let mut value = filled_complex();
    json::from_str(COMPLEX_EMPTY_JSON, &mut value).unwrap();
    assert_eq!(value, Complex::default());
}

#[test]
fn whitespace_and_key_order_are_free() {
    let text = "{ \"right\" :\t2 ,\n \"left\": 1 }";
    assert_eq!(decode::<Inner>(text).unwrap(), Inner { left: 1, right: 2 });
}

#[test]
fn duplicate_keys_are_invalid() {
    assert_eq!(
        schema_error::<Inner>(r#"{"left":1,"left":2,"right":3}"#),
        Some(Schema::InvalidKey)
    );
}

#[test]
fn missing_keys_are_listed() {
    let error = decode::<Inner>(r#"{"left":1}"#).unwrap_err();
    assert_eq!(error, WireError::MissingKeys(vec!["right"]));

    let error = decode::<StringOrInt>("{}").unwrap_err();
    assert_eq!(error.missing_keys(), &["a_string", "a_int"]);
}

#[test]
fn variants_hold_exactly_one_option() {
    assert_eq!(
        decode::<StringOrInt>(r#"{"a_string":"x"}"#).unwrap(),
        StringOrInt::Str("x".to_owned())
    );
    assert_eq!(
        schema_error::<StringOrInt>(r#"{"a_int":0,"a_string":""}"#),
        Some(Schema::InvalidKey)
    );
}

#[test]
fn inline_variants() {
    let payment = Payment {
        id: 7,
        amount: StringOrInt::Int(-3),
        memo: None,
    };
    assert_eq!(json::to_string(&payment).unwrap(), r#"{"id":7,"a_int":-3}"#);
    roundtrip::<Json, _>(&payment);

    let payment: Payment = decode(r#"{"text":"thanks","a_string":"all","id":1}"#).unwrap();
    assert_eq!(payment.amount, StringOrInt::Str("all".to_owned()));
    assert_eq!(payment.memo, Some(Memo::Text("thanks".to_owned())));

    let error = decode::<Payment>(r#"{"id":1}"#).unwrap_err();
    assert_eq!(error.missing_keys(), &["a_string", "a_int"]);
}

#[test]
fn integer_ranges() {
    assert_eq!(
        schema_error::<Inner>(r#"{"left":4294967296,"right":0}"#),
        Some(Schema::SmallerInteger)
    );
    assert_eq!(
        schema_error::<Inner>(r#"{"left":-1,"right":0}"#),
        Some(Schema::LargerInteger)
    );

    let mut complex = filled_complex();
    let text = COMPLEX_FILLED_JSON.replace(r#""int8":-128"#, r#""int8":-129"#);
    assert_eq!(
        json::from_str(&text, &mut complex).unwrap_err().schema(),
        Some(Schema::LargerInteger)
    );
    let text = COMPLEX_FILLED_JSON.replace(r#""int8":-128"#, r#""int8":128"#);
    assert_eq!(
        json::from_str(&text, &mut complex).unwrap_err().schema(),
        Some(Schema::SmallerInteger)
    );
}

#[test]
fn schema_mismatches() {
    assert_eq!(
        schema_error::<Inner>(r#"{"left":"1","right":0}"#),
        Some(Schema::Integer)
    );
    assert_eq!(
        schema_error::<Inner>(r#"{"left":1.5,"right":0}"#),
        Some(Schema::Integer)
    );
    assert_eq!(schema_error::<Inner>("[]"), Some(Schema::Object));
    assert_eq!(schema_error::<Vec<u32>>("{}"), Some(Schema::Array));
    assert_eq!(schema_error::<bool>("1"), Some(Schema::Boolean));
    assert_eq!(schema_error::<String>("true"), Some(Schema::String));
    assert_eq!(schema_error::<[u8; 2]>(r#""00""#), Some(Schema::FixedBinary));
}

#[test]
fn syntax_errors() {
    assert!(matches!(
        decode::<Vec<u32>>("[1,2"),
        Err(WireError::Json(JsonError::UnexpectedEnd(_)))
    ));
    assert!(matches!(
        decode::<Inner>(r#"{"left" 1}"#),
        Err(WireError::Json(JsonError::Expected { .. }))
    ));
    assert_eq!(
        decode::<Vec<u32>>("[1] [2]"),
        Err(WireError::Json(JsonError::TrailingCharacters(3)))
    );
}

#[test]
fn unknown_keys() {
    let text = r#"{"left":1,"extra":{"deep":[1,{"x":null}]},"right":2}"#;
    assert_eq!(decode::<Inner>(text).unwrap(), Inner { left: 1, right: 2 });

    let mut inner = Inner::default();
    let error = Json::from_bytes_with(
        text.as_bytes(),
        &mut inner,
        ReadOptions::new().reject_unknown_keys(),
    )
    .unwrap_err();
    assert_eq!(error.schema(), Some(Schema::InvalidKey));
}

#[test]
fn optional_root() {
    assert_eq!(decode::<Option<Inner>>("").unwrap(), None);
    assert_eq!(
        decode::<Option<Inner>>(r#"{"left":1,"right":2}"#).unwrap(),
        Some(Inner { left: 1, right: 2 })
    );
    assert_eq!(schema_error::<Inner>(""), Some(Schema::Object));
}

#[test]
fn nesting_depth_is_limited() {
    // every tree level is an object plus its `children` array
    let levels = MAX_READ_DEPTH / 2;
    let text = json::to_string(&deep_tree(levels)).unwrap();
    assert_eq!(decode::<Tree>(&text).unwrap(), deep_tree(levels));

    let text = json::to_string(&deep_tree(levels + 1)).unwrap();
    assert_eq!(schema_error::<Tree>(&text), Some(Schema::MaximumDepth));
}

#[test]
fn skipped_values_count_toward_depth() {
    // the object holding the unknown key is already one level deep
    let nested = |levels: usize| {
        format!(
            r#"{{"left":1,"extra":{}{},"right":2}}"#,
            "[".repeat(levels),
            "]".repeat(levels)
        )
    };
    let inner = Inner { left: 1, right: 2 };
    assert_eq!(decode::<Inner>(&nested(MAX_READ_DEPTH - 1)).unwrap(), inner);
    assert_eq!(
        schema_error::<Inner>(&nested(MAX_READ_DEPTH)),
        Some(Schema::MaximumDepth)
    );

    // brackets inside strings are text
    let text = format!(r#"{{"left":1,"extra":["{}"],"right":2}}"#, "[".repeat(200));
    assert_eq!(decode::<Inner>(&text).unwrap(), inner);
}

#[test]
fn basic_values_re_encode_verbatim() {
    for text in ["null", "true", "-5", "5", "2.5", r#""text""#, "18446744073709551615"] {
        let value: BasicValue = decode(text).unwrap();
        assert_eq!(json::to_string(&value).unwrap(), text);
    }
    assert_eq!(decode::<BasicValue>("-5").unwrap(), BasicValue::Integer(-5));
    assert_eq!(
        decode::<BasicValue>("5").unwrap(),
        BasicValue::UnsignedInteger(5)
    );
    assert_eq!(schema_error::<BasicValue>("[]"), Some(Schema::Number));
}

#[test]
fn non_finite_reals_cannot_be_written() {
    let complex = Complex {
        real: f64::INFINITY,
        ..Complex::default()
    };
    assert_eq!(
        Json::to_bytes(&complex),
        Err(WireError::Json(JsonError::NonFinite))
    );
}

#[test]
fn dynamic_reader_and_writer() {
    let mut writer = JsonWriter::new();
    {
        let dest: &mut dyn Writer = &mut writer;
        filled_complex().write_bytes(dest).unwrap();
    }
    let bytes = writer.finish().unwrap();
    assert_eq!(bytes, COMPLEX_FILLED_JSON.as_bytes());

    let mut reader = JsonReader::new(&bytes);
    let source: &mut dyn Reader = &mut reader;
    let mut decoded = Complex::default();
    read::from_reader(source, &mut decoded).unwrap();
    assert_eq!(decoded, filled_complex());
}

#[test]
fn escaped_strings() {
    let text = r#""tab\tquote\"slash\\ é""#;
    let value: String = decode(text).unwrap();
    assert_eq!(value, "tab\tquote\"slash\\ \u{e9}");
    let written = json::to_string(&value).unwrap();
    assert_eq!(decode::<String>(&written).unwrap(), value);
}
