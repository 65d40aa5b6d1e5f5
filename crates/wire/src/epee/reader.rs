//! Portable storage reader.

use wire_buffers::{hex_snippet, Span};

use crate::basic_value::BasicValue;
use crate::constants::MAX_READ_DEPTH;
use crate::error::{fail, Result, Schema, WireError};
use crate::options::{ReadOptions, UnknownKeys};
use crate::read::{Depth, Reader};
use crate::traits::WireKind;

use super::constants::{
    read_varint, varint_width, Kind, Tag, FORMAT_VERSION, HEADER_SIZE, SIGNATURE_A,
    SIGNATURE_B,
};
use super::error::EpeeError;

/// Reads portable storage ("epee binary") from a borrowed buffer.
///
/// The reader tracks the tag of the value it is positioned on. Keys read
/// the next tag, arrays strip the array flag so that elements see the bare
/// element kind, and the end of an object or array leaves the object or
/// array tag behind for the enclosing container.
#[derive(Debug)]
pub struct EpeeReader<'a> {
    source: Span<'a>,
    /// Bytes not yet promised to the minimum size of an open array.
    array_space: usize,
    last: Option<Tag>,
    depth: Depth,
    skip_stack: Vec<(usize, Tag)>,
    options: ReadOptions,
}

impl<'a> EpeeReader<'a> {
    /// Validates the storage header and positions the reader on the root
    /// object.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        Self::with_options(bytes, ReadOptions::default())
    }

    pub fn with_options(bytes: &'a [u8], options: ReadOptions) -> Result<Self> {
        let mut source = Span::new(bytes);
        let header = match source.take(HEADER_SIZE) {
            Ok(header) => header,
            Err(_) => {
                return fail(
                    EpeeError::NotEnoughBytes("storage header"),
                    format_args!("input of {} bytes", bytes.len()),
                )
            }
        };
        let mut header = Span::new(header);
        let signature_a = header.u32_le().unwrap_or_default();
        let signature_b = header.u32_le().unwrap_or_default();
        let version = header.u8().unwrap_or_default();
        if signature_a != SIGNATURE_A || signature_b != SIGNATURE_B {
            return fail(
                EpeeError::Signature,
                format_args!("header {}", hex_snippet(bytes, HEADER_SIZE)),
            );
        }
        if version != FORMAT_VERSION {
            return fail(EpeeError::Version(version), format_args!("expected {FORMAT_VERSION}"));
        }

        Ok(Self {
            array_space: source.len(),
            source,
            last: Some(Tag::OBJECT),
            depth: Depth::new(),
            skip_stack: Vec::new(),
            options,
        })
    }

    fn truncated<T>(&self, what: &'static str) -> Result<T> {
        fail(
            EpeeError::NotEnoughBytes(what),
            format_args!("{} bytes left", self.source.len()),
        )
    }

    fn tag_is(&self, tag: Tag) -> bool {
        self.last == Some(tag)
    }

    fn last_kind(&self) -> Option<Kind> {
        match self.last {
            Some(Tag { kind, array: false }) => Some(kind),
            _ => None,
        }
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let Ok(byte) = self.source.u8() else {
            return self.truncated("type tag");
        };
        match Tag::from_byte(byte) {
            Some(tag) => Ok(tag),
            None => fail(
                EpeeError::InvalidTag(byte),
                format_args!("near {}", hex_snippet(self.source.as_slice(), 16)),
            ),
        }
    }

    fn varint(&mut self) -> Result<usize> {
        let value = read_varint(&mut self.source)?;
        match usize::try_from(value) {
            Ok(value) => Ok(value),
            Err(_) => self.truncated("varint sized value"),
        }
    }

    fn read_name(&mut self) -> Result<&'a [u8]> {
        let Ok(length) = self.source.u8() else {
            return self.truncated("key length");
        };
        match self.source.take(usize::from(length)) {
            Ok(name) => Ok(name),
            Err(_) => self.truncated("key name"),
        }
    }

    /// Length prefixed bytes of a string-tagged value.
    fn raw(&mut self, expected: Schema) -> Result<&'a [u8]> {
        if self.last_kind() != Some(Kind::String) {
            return fail(expected, format_args!("found tag {:?}", self.last));
        }
        let length = self.varint()?;
        match self.source.take(length) {
            Ok(bytes) => Ok(bytes),
            Err(_) => self.truncated("string payload"),
        }
    }

    fn fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        match self.source.take_array::<N>() {
            Ok(bytes) => Ok(bytes),
            Err(_) => self.truncated("fixed size number"),
        }
    }

    fn skip_fixed(&mut self, count: usize) -> Result<()> {
        let size = match self.last {
            Some(tag) => tag.kind.min_wire_size(),
            None => return Err(WireError::Traversal("no value to skip")),
        };
        if self.source.len() / size < count {
            return self.truncated("skipped fixed size values");
        }
        self.source.remove_prefix(size * count);
        Ok(())
    }

    fn begin_array(&mut self, min_element_size: usize) -> Result<usize> {
        self.depth.increment()?;

        if self.tag_is(Tag::ARRAY) {
            self.last = Some(self.read_tag()?);
        }
        let element = match self.last {
            Some(Tag { kind, array: true }) => kind,
            _ => return fail(Schema::Array, format_args!("found tag {:?}", self.last)),
        };
        self.last = Some(Tag::scalar(element));

        let count = self.varint()?;
        let remaining = self.array_space.min(self.source.len());
        let min_element_size = element.min_wire_size().max(min_element_size);
        if remaining / min_element_size < count {
            return fail(
                Schema::ArrayMinSize,
                format_args!(
                    "{count} elements of at least {min_element_size} bytes exceed {remaining} bytes"
                ),
            );
        }
        self.array_space = remaining - count * min_element_size;
        Ok(count)
    }

    fn begin_object(&mut self) -> Result<usize> {
        self.depth.increment()?;
        if !self.tag_is(Tag::OBJECT) {
            return fail(Schema::Object, format_args!("found tag {:?}", self.last));
        }
        self.last = None;
        self.varint()
    }

    /// Skips the value the reader is positioned on, without recursion.
    fn skip_next(&mut self) -> Result<()> {
        let mut stack = std::mem::take(&mut self.skip_stack);
        stack.clear();
        stack.reserve(MAX_READ_DEPTH);
        let result = self.skip_with(&mut stack);
        self.skip_stack = stack;
        result
    }

    fn push_skip(&mut self, stack: &mut Vec<(usize, Tag)>, tag: Tag) -> Result<()> {
        let count = if tag.is_array_like() {
            self.begin_array(0)?
        } else if tag == Tag::OBJECT {
            self.begin_object()?
        } else {
            1
        };
        stack.push((count, tag));
        Ok(())
    }

    fn skip_with(&mut self, stack: &mut Vec<(usize, Tag)>) -> Result<()> {
        let Some(first) = self.last else {
            return Err(WireError::Traversal("no value to skip"));
        };
        self.push_skip(stack, first)?;

        loop {
            while let Some(&(0, tag)) = stack.last() {
                if tag.is_array_like() {
                    self.depth.decrement();
                    self.last = Some(Tag::ARRAY);
                } else if tag == Tag::OBJECT {
                    self.depth.decrement();
                    self.last = Some(Tag::OBJECT);
                }
                stack.pop();
            }

            let Some(top) = stack.last_mut() else {
                return Ok(());
            };
            let tag = top.1;
            match tag.kind {
                Kind::Array => {
                    top.0 -= 1;
                    let Some(next) = self.last else {
                        return Err(WireError::Traversal("no value to skip"));
                    };
                    self.push_skip(stack, next)?;
                }
                Kind::Object if tag.array => {
                    top.0 -= 1;
                    self.last = Some(Tag::OBJECT);
                    self.push_skip(stack, Tag::OBJECT)?;
                }
                Kind::Object => {
                    top.0 -= 1;
                    self.read_name()?;
                    let next = self.read_tag()?;
                    self.last = Some(next);
                    self.push_skip(stack, next)?;
                }
                Kind::String => {
                    top.0 -= 1;
                    self.raw(Schema::String)?;
                }
                _ => {
                    let count = std::mem::take(&mut top.0);
                    self.skip_fixed(count)?;
                }
            }
        }
    }
}

impl<'a> Reader for EpeeReader<'a> {
    fn depth(&self) -> usize {
        self.depth.get()
    }

    fn remaining(&self) -> usize {
        self.source.len()
    }

    fn delimited_arrays(&self) -> bool {
        false
    }

    fn min_element_size(&self, kind: WireKind) -> usize {
        match kind {
            WireKind::Real => Kind::Double.min_wire_size(),
            WireKind::Array => Kind::Array.min_wire_size(),
            WireKind::Boolean
            | WireKind::Integer
            | WireKind::String
            | WireKind::Binary
            | WireKind::Object
            | WireKind::Any => 1,
        }
    }

    fn min_binary_size(&self, size: usize) -> usize {
        varint_width(size as u64).saturating_add(size)
    }

    fn check_complete(&self) -> Result<()> {
        if self.depth.get() != 0 || !self.tag_is(Tag::OBJECT) {
            return Err(WireError::Traversal("root object was not read completely"));
        }
        if !self.source.is_empty() {
            return fail(
                EpeeError::TrailingBytes(self.source.len()),
                format_args!("trailing {}", hex_snippet(self.source.as_slice(), 16)),
            );
        }
        Ok(())
    }

    fn basic(&mut self) -> Result<BasicValue> {
        match self.last_kind() {
            Some(Kind::Bool) => self.boolean().map(BasicValue::Boolean),
            Some(Kind::Double) => self.real().map(BasicValue::Real),
            Some(Kind::String) => self.string().map(BasicValue::String),
            Some(Kind::Int64 | Kind::Int32 | Kind::Int16 | Kind::Int8) => {
                self.integer().map(BasicValue::Integer)
            }
            Some(Kind::Uint64 | Kind::Uint32 | Kind::Uint16 | Kind::Uint8) => {
                self.unsigned_integer().map(BasicValue::UnsignedInteger)
            }
            _ => fail(
                Schema::Number,
                format_args!("expected a boolean, integer, real or string, found {:?}", self.last),
            ),
        }
    }

    fn boolean(&mut self) -> Result<bool> {
        if self.last_kind() != Some(Kind::Bool) {
            return fail(Schema::Boolean, format_args!("found tag {:?}", self.last));
        }
        let [byte] = self.fixed::<1>()?;
        Ok(byte != 0)
    }

    fn integer(&mut self) -> Result<i64> {
        match self.last_kind() {
            Some(Kind::Int64) => Ok(i64::from_le_bytes(self.fixed()?)),
            Some(Kind::Int32) => Ok(i32::from_le_bytes(self.fixed()?).into()),
            Some(Kind::Int16) => Ok(i16::from_le_bytes(self.fixed()?).into()),
            Some(Kind::Int8) => Ok(i8::from_le_bytes(self.fixed()?).into()),
            _ => fail(
                Schema::Integer,
                format_args!("expected a signed integer, found {:?}", self.last),
            ),
        }
    }

    fn unsigned_integer(&mut self) -> Result<u64> {
        match self.last_kind() {
            Some(Kind::Uint64) => Ok(u64::from_le_bytes(self.fixed()?)),
            Some(Kind::Uint32) => Ok(u32::from_le_bytes(self.fixed()?).into()),
            Some(Kind::Uint16) => Ok(u16::from_le_bytes(self.fixed()?).into()),
            Some(Kind::Uint8) => Ok(u8::from_le_bytes(self.fixed()?).into()),
            _ => fail(
                Schema::Integer,
                format_args!("expected an unsigned integer, found {:?}", self.last),
            ),
        }
    }

    fn real(&mut self) -> Result<f64> {
        if self.last_kind() != Some(Kind::Double) {
            return fail(Schema::Number, format_args!("found tag {:?}", self.last));
        }
        Ok(f64::from_le_bytes(self.fixed()?))
    }

    fn string(&mut self) -> Result<String> {
        let bytes = self.raw(Schema::String)?;
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_owned()),
            Err(error) => fail(Schema::String, format_args!("invalid UTF-8: {error}")),
        }
    }

    fn string_into(&mut self, dest: &mut [u8], exact: bool) -> Result<usize> {
        let bytes = self.raw(Schema::String)?;
        if (exact && bytes.len() != dest.len()) || dest.len() < bytes.len() {
            return fail(
                Schema::String,
                format_args!("{} bytes into a buffer of {}", bytes.len(), dest.len()),
            );
        }
        dest[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn binary(&mut self) -> Result<Vec<u8>> {
        self.raw(Schema::Binary).map(<[u8]>::to_vec)
    }

    fn binary_into(&mut self, dest: &mut [u8], exact: bool) -> Result<usize> {
        let bytes = self.raw(Schema::Binary)?;
        if !exact && dest.len() < bytes.len() {
            return fail(
                Schema::Binary,
                format_args!("of max size {} but got {}", dest.len(), bytes.len()),
            );
        }
        if exact && dest.len() != bytes.len() {
            return fail(
                Schema::FixedBinary,
                format_args!("of size {} but got {}", dest.len(), bytes.len()),
            );
        }
        dest[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn start_array(&mut self, min_element_size: usize) -> Result<usize> {
        self.begin_array(min_element_size)
    }

    fn is_array_end(&mut self, count: usize) -> Result<bool> {
        if count == 0 {
            self.last = Some(Tag::ARRAY);
        }
        Ok(count == 0)
    }

    fn end_array(&mut self) {
        self.depth.decrement();
    }

    fn start_object(&mut self) -> Result<usize> {
        self.begin_object()
    }

    fn key(&mut self, map: &[&str], state: &mut usize) -> Result<Option<usize>> {
        // `state` counts the fields left on the wire
        while *state != 0 {
            *state -= 1;
            let name = self.read_name()?;
            self.last = Some(self.read_tag()?);
            if let Some(index) = map.iter().position(|key| key.as_bytes() == name) {
                return Ok(Some(index));
            }
            if self.options.unknown_keys == UnknownKeys::Reject {
                return fail(
                    Schema::InvalidKey,
                    format_args!("unknown key `{}`", String::from_utf8_lossy(name)),
                );
            }
            self.skip_next()?;
        }
        self.last = Some(Tag::OBJECT);
        Ok(None)
    }

    fn end_object(&mut self) {
        self.depth.decrement();
    }
}
