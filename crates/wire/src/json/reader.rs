//! JSON reader.

use std::borrow::Cow;

use serde::de::IgnoredAny;
use serde_json::Number;
use wire_buffers::{text_snippet, Span};

use crate::basic_value::BasicValue;
use crate::constants::MAX_READ_DEPTH;
use crate::error::{fail, Result, Schema};
use crate::options::{ReadOptions, UnknownKeys};
use crate::read::{Depth, Reader};
use crate::traits::WireKind;

use super::error::JsonError;
use super::util::{find_ending_quote, is_whitespace, number_length};

/// Bytes of input quoted in diagnostics.
const SNIPPET_SIZE: usize = 30;

/// A number token, classified by its lexical form.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Unsigned(u64),
    Negative(i64),
    Real(f64),
}

/// Reads JSON from a borrowed buffer.
///
/// Values are tokenized by hand; string unescaping, number grammar and
/// skipping of unknown values are handed to `serde_json`.
#[derive(Debug)]
pub struct JsonReader<'a> {
    input: &'a [u8],
    source: Span<'a>,
    depth: Depth,
    options: ReadOptions,
}

impl<'a> JsonReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, ReadOptions::default())
    }

    pub fn with_options(input: &'a [u8], options: ReadOptions) -> Self {
        Self {
            input,
            source: Span::new(input),
            depth: Depth::new(),
            options,
        }
    }

    fn offset(&self) -> usize {
        self.input.len() - self.source.len()
    }

    fn near(&self) -> Cow<'a, str> {
        text_snippet(self.source.as_slice(), SNIPPET_SIZE)
    }

    fn syntax<T>(&self, error: JsonError) -> Result<T> {
        fail(error, format_args!("near \"{}\"", self.near()))
    }

    fn mismatch<T>(&self, expected: Schema) -> Result<T> {
        fail(expected, format_args!("near \"{}\"", self.near()))
    }

    fn expected<T>(&self, expected: &'static str) -> Result<T> {
        if self.source.is_empty() {
            return self.syntax(JsonError::UnexpectedEnd(self.offset()));
        }
        self.syntax(JsonError::Expected {
            expected,
            offset: self.offset(),
        })
    }

    /// Skips whitespace and returns the next byte without consuming it.
    fn next_token(&mut self) -> Option<u8> {
        self.source.skip_while(is_whitespace);
        self.source.first()
    }

    fn literal(&mut self, word: &'static [u8]) -> bool {
        if self.source.as_slice().starts_with(word) {
            self.source.remove_prefix(word.len());
            true
        } else {
            false
        }
    }

    /// Contents of the next string token, between its quotes, unescaped.
    fn raw_string(&mut self, expected: Schema) -> Result<Cow<'a, str>> {
        if self.next_token() != Some(b'"') {
            return self.mismatch(expected);
        }
        let start = self.offset();
        let data = self.source.as_slice();
        let end = match find_ending_quote(data, 1) {
            Ok(end) => end,
            Err(error) => return self.syntax(error),
        };
        let contents = &data[1..end];

        let plain = !contents.iter().any(|&byte| byte == b'\\' || byte < 0x20);
        let value = if plain {
            match std::str::from_utf8(contents) {
                Ok(text) => Cow::Borrowed(text),
                Err(error) => return fail(expected, format_args!("invalid UTF-8: {error}")),
            }
        } else {
            match serde_json::from_slice::<String>(&data[..=end]) {
                Ok(text) => Cow::Owned(text),
                Err(error) => {
                    return self.syntax(JsonError::Parse {
                        offset: start + error.column().saturating_sub(1),
                        message: error.to_string(),
                    })
                }
            }
        };
        self.source.remove_prefix(end + 1);
        Ok(value)
    }

    /// Hex digits of the next string token. Hex never needs escapes.
    fn hex_digits(&mut self, expected: Schema) -> Result<&'a [u8]> {
        if self.next_token() != Some(b'"') {
            return self.mismatch(expected);
        }
        let data = self.source.as_slice();
        let Some(end) = data[1..].iter().position(|&byte| byte == b'"') else {
            return self.syntax(JsonError::StringMissQuotation(self.offset()));
        };
        self.source.remove_prefix(end + 2);
        Ok(&data[1..=end])
    }

    fn number(&mut self, expected: Schema) -> Result<Numeric> {
        match self.next_token() {
            Some(b'-' | b'0'..=b'9') => {}
            _ => return self.mismatch(expected),
        }
        let data = self.source.as_slice();
        let token = &data[..number_length(data)];
        let number = match serde_json::from_slice::<Number>(token) {
            Ok(number) => number,
            Err(_) => return self.syntax(JsonError::InvalidNumber(self.offset())),
        };
        self.source.remove_prefix(token.len());

        if let Some(value) = number.as_u64() {
            Ok(Numeric::Unsigned(value))
        } else if let Some(value) = number.as_i64() {
            Ok(Numeric::Negative(value))
        } else {
            Ok(Numeric::Real(number.as_f64().unwrap_or(f64::NAN)))
        }
    }

    /// Skips one complete value of any kind.
    fn skip_value(&mut self) -> Result<()> {
        self.source.skip_while(is_whitespace);
        self.check_skip_depth()?;
        let start = self.offset();
        let mut values =
            serde_json::Deserializer::from_slice(self.source.as_slice()).into_iter::<IgnoredAny>();
        match values.next() {
            Some(Ok(IgnoredAny)) => {
                self.source.remove_prefix(values.byte_offset());
                Ok(())
            }
            Some(Err(error)) => self.syntax(JsonError::Parse {
                offset: start,
                message: error.to_string(),
            }),
            None => self.syntax(JsonError::UnexpectedEnd(start)),
        }
    }

    /// Fails when the container about to be skipped nests deeper than the
    /// depth left to the reader. Brackets inside strings do not count, and
    /// malformed input is left for the parser to report.
    fn check_skip_depth(&self) -> Result<()> {
        let data = self.source.as_slice();
        if !matches!(data.first(), Some(b'[' | b'{')) {
            return Ok(());
        }

        let mut nesting = 0usize;
        let mut x = 0;
        while let Some(&byte) = data.get(x) {
            match byte {
                b'[' | b'{' => {
                    nesting += 1;
                    if MAX_READ_DEPTH < self.depth.get() + nesting {
                        return fail(
                            Schema::MaximumDepth,
                            format_args!("skipped value nests deeper than {MAX_READ_DEPTH} levels"),
                        );
                    }
                }
                b']' | b'}' => {
                    nesting -= 1;
                    if nesting == 0 {
                        break;
                    }
                }
                b'"' => match find_ending_quote(data, x + 1) {
                    Ok(end) => x = end,
                    Err(_) => break,
                },
                _ => {}
            }
            x += 1;
        }
        Ok(())
    }

    fn separator(&mut self, byte: u8, expected: &'static str) -> Result<()> {
        if self.next_token() != Some(byte) {
            return self.expected(expected);
        }
        self.source.remove_prefix(1);
        Ok(())
    }
}

impl<'a> Reader for JsonReader<'a> {
    fn depth(&self) -> usize {
        self.depth.get()
    }

    fn remaining(&self) -> usize {
        self.source.len()
    }

    fn delimited_arrays(&self) -> bool {
        true
    }

    fn min_element_size(&self, kind: WireKind) -> usize {
        match kind {
            // `true`
            WireKind::Boolean => 4,
            // `""`, `{}`, `[]`
            WireKind::String | WireKind::Binary | WireKind::Object | WireKind::Array => 2,
            WireKind::Integer | WireKind::Real | WireKind::Any => 1,
        }
    }

    fn min_binary_size(&self, size: usize) -> usize {
        // quoted hex
        size.saturating_mul(2).saturating_add(2)
    }

    fn check_complete(&self) -> Result<()> {
        if self.depth.get() != 0 {
            return self.syntax(JsonError::UnexpectedEnd(self.offset()));
        }
        let trailing = self
            .source
            .as_slice()
            .iter()
            .filter(|&&byte| !is_whitespace(byte))
            .count();
        if trailing != 0 {
            return self.syntax(JsonError::TrailingCharacters(trailing));
        }
        Ok(())
    }

    fn basic(&mut self) -> Result<BasicValue> {
        match self.next_token() {
            Some(b'n') if self.literal(b"null") => Ok(BasicValue::Null),
            Some(b't' | b'f') => self.boolean().map(BasicValue::Boolean),
            Some(b'"') => self
                .raw_string(Schema::String)
                .map(|text| BasicValue::String(text.into_owned())),
            Some(b'-' | b'0'..=b'9') => Ok(match self.number(Schema::Number)? {
                Numeric::Unsigned(value) => BasicValue::UnsignedInteger(value),
                Numeric::Negative(value) => BasicValue::Integer(value),
                Numeric::Real(value) => BasicValue::Real(value),
            }),
            _ => fail(
                Schema::Number,
                format_args!(
                    "expected a boolean, integer, real or string near \"{}\"",
                    self.near()
                ),
            ),
        }
    }

    fn boolean(&mut self) -> Result<bool> {
        self.next_token();
        if self.literal(b"true") {
            Ok(true)
        } else if self.literal(b"false") {
            Ok(false)
        } else {
            self.mismatch(Schema::Boolean)
        }
    }

    fn integer(&mut self) -> Result<i64> {
        match self.number(Schema::Integer)? {
            Numeric::Negative(value) => Ok(value),
            Numeric::Unsigned(value) => match i64::try_from(value) {
                Ok(value) => Ok(value),
                Err(_) => fail(Schema::SmallerInteger, format_args!("{value} exceeds i64")),
            },
            Numeric::Real(value) => fail(Schema::Integer, format_args!("found real {value}")),
        }
    }

    fn unsigned_integer(&mut self) -> Result<u64> {
        match self.number(Schema::Integer)? {
            Numeric::Unsigned(value) => Ok(value),
            Numeric::Negative(value) => {
                fail(Schema::LargerInteger, format_args!("{value} is negative"))
            }
            Numeric::Real(value) => fail(Schema::Integer, format_args!("found real {value}")),
        }
    }

    fn real(&mut self) -> Result<f64> {
        Ok(match self.number(Schema::Number)? {
            Numeric::Unsigned(value) => value as f64,
            Numeric::Negative(value) => value as f64,
            Numeric::Real(value) => value,
        })
    }

    fn string(&mut self) -> Result<String> {
        self.raw_string(Schema::String).map(Cow::into_owned)
    }

    fn string_into(&mut self, dest: &mut [u8], exact: bool) -> Result<usize> {
        let text = self.raw_string(Schema::String)?;
        let bytes = text.as_bytes();
        if (exact && bytes.len() != dest.len()) || dest.len() < bytes.len() {
            return fail(
                Schema::String,
                format_args!("of size {} but got {}", dest.len(), bytes.len()),
            );
        }
        dest[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn binary(&mut self) -> Result<Vec<u8>> {
        let digits = self.hex_digits(Schema::Binary)?;
        match hex::decode(digits) {
            Ok(bytes) => Ok(bytes),
            Err(error) => fail(Schema::Binary, format_args!("invalid hex: {error}")),
        }
    }

    fn binary_into(&mut self, dest: &mut [u8], exact: bool) -> Result<usize> {
        let digits = self.hex_digits(Schema::Binary)?;
        let mut size = dest.len();
        if !exact && digits.len() / 2 <= size {
            size = digits.len() / 2;
        }
        match hex::decode_to_slice(digits, &mut dest[..size]) {
            Ok(()) => Ok(size),
            Err(error) => fail(
                if exact {
                    Schema::FixedBinary
                } else {
                    Schema::Binary
                },
                format_args!(
                    "{error}: expected {} hex digits but got {}",
                    size * 2,
                    digits.len()
                ),
            ),
        }
    }

    fn start_array(&mut self, _min_element_size: usize) -> Result<usize> {
        if self.next_token() != Some(b'[') {
            return self.mismatch(Schema::Array);
        }
        self.source.remove_prefix(1);
        self.depth.increment()?;
        Ok(0)
    }

    fn is_array_end(&mut self, count: usize) -> Result<bool> {
        match self.next_token() {
            Some(b']') => {
                self.source.remove_prefix(1);
                Ok(true)
            }
            None => self.expected("`,` or `]`"),
            Some(_) if count == 0 => Ok(false),
            Some(b',') => {
                self.source.remove_prefix(1);
                Ok(false)
            }
            Some(_) => self.expected("`,` or `]`"),
        }
    }

    fn end_array(&mut self) {
        self.depth.decrement();
    }

    fn start_object(&mut self) -> Result<usize> {
        if self.next_token() != Some(b'{') {
            return self.mismatch(Schema::Object);
        }
        self.source.remove_prefix(1);
        self.depth.increment()?;
        Ok(0)
    }

    fn key(&mut self, map: &[&str], state: &mut usize) -> Result<Option<usize>> {
        // `state` counts the keys read from this object so far
        loop {
            match self.next_token() {
                Some(b'}') => {
                    self.source.remove_prefix(1);
                    return Ok(None);
                }
                None => return self.expected("`,` or `}`"),
                Some(_) if *state == 0 => {}
                Some(b',') => {
                    self.source.remove_prefix(1);
                }
                Some(_) => return self.expected("`,` or `}`"),
            }
            *state += 1;

            let name = self.raw_string(Schema::String)?;
            self.separator(b':', "`:`")?;
            if let Some(index) = map.iter().position(|key| *key == name) {
                return Ok(Some(index));
            }
            if self.options.unknown_keys == UnknownKeys::Reject {
                return fail(Schema::InvalidKey, format_args!("unknown key `{name}`"));
            }
            self.skip_value()?;
        }
    }

    fn end_object(&mut self) {
        self.depth.decrement();
    }
}
