//! Portable storage writer.

use wire_buffers::ByteStream;

use crate::error::{fail, Result, WireError};
use crate::write::Writer;

use super::constants::{
    write_varint, Kind, Tag, FORMAT_VERSION, HEADER_SIZE, SIGNATURE_A, SIGNATURE_B,
};
use super::error::EpeeError;

#[derive(Debug, Clone, Copy)]
enum Frame {
    Object {
        remaining: usize,
        awaiting_value: bool,
    },
    Array {
        count: usize,
        written: usize,
        element: Option<Kind>,
    },
}

/// Writes portable storage ("epee binary").
///
/// The root must be an object. Array tags are only known once the first
/// element arrives, so the tag and count of an array are emitted lazily
/// with its first element; empty arrays are written as an empty `u8`
/// array.
#[derive(Debug, Default)]
pub struct EpeeWriter {
    bytes: ByteStream,
    stack: Vec<Frame>,
    started: bool,
}

impl EpeeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the encoded storage once the root object is closed.
    pub fn finish(self) -> Result<Vec<u8>> {
        if !self.started || !self.stack.is_empty() {
            return Err(WireError::Traversal("root object was not written completely"));
        }
        Ok(self.bytes.into_vec())
    }

    fn varint(&mut self, value: usize) -> Result<()> {
        write_varint(&mut self.bytes, value as u64)?;
        Ok(())
    }

    /// Emits whatever precedes a value of `kind` in the current container:
    /// the tag inside objects, the array tag and count before the first
    /// element of an array.
    fn prefix(&mut self, kind: Kind) -> Result<()> {
        match self.stack.last_mut() {
            None => fail(
                EpeeError::RootNotObject,
                format_args!("{kind:?} written outside of an object"),
            ),
            Some(Frame::Object { awaiting_value, .. }) => {
                if !std::mem::take(awaiting_value) {
                    return Err(WireError::Traversal("value written without a key"));
                }
                // nested arrays carry their own array tag
                if kind != Kind::Array {
                    self.bytes.put(Tag::scalar(kind).to_byte());
                }
                Ok(())
            }
            Some(Frame::Array {
                count,
                written,
                element,
            }) => {
                if written == count {
                    return Err(WireError::Traversal("more array elements than declared"));
                }
                *written += 1;
                match *element {
                    None => {
                        *element = Some(kind);
                        let count = *count as u64;
                        self.bytes.put(Tag::array_of(kind).to_byte());
                        write_varint(&mut self.bytes, count)?;
                        Ok(())
                    }
                    Some(existing) if existing == kind => Ok(()),
                    Some(existing) => fail(
                        EpeeError::MixedArray,
                        format_args!("{kind:?} element in an array of {existing:?}"),
                    ),
                }
            }
        }
    }

    fn name(&mut self, name: &[u8]) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object {
                remaining,
                awaiting_value,
            }) if !*awaiting_value => {
                if *remaining == 0 {
                    return Err(WireError::Traversal("more object fields than declared"));
                }
                *remaining -= 1;
                *awaiting_value = true;
            }
            _ => return Err(WireError::Traversal("key written outside of an object")),
        }
        let Ok(length) = u8::try_from(name.len()) else {
            return fail(
                EpeeError::KeyTooLong(name.len()),
                format_args!("key {}", String::from_utf8_lossy(name)),
            );
        };
        self.bytes.put(length);
        self.bytes.write(name);
        Ok(())
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.prefix(Kind::String)?;
        self.varint(bytes.len())?;
        self.bytes.write(bytes);
        Ok(())
    }
}

impl Writer for EpeeWriter {
    fn need_array_size(&self) -> bool {
        true
    }

    fn null(&mut self) -> Result<()> {
        fail(EpeeError::Unsupported("null"), format_args!("no null tag"))
    }

    fn boolean(&mut self, value: bool) -> Result<()> {
        self.prefix(Kind::Bool)?;
        self.bytes.put(u8::from(value));
        Ok(())
    }

    fn integer(&mut self, value: i64) -> Result<()> {
        self.prefix(Kind::Int64)?;
        self.bytes.u64_le(value as u64);
        Ok(())
    }

    fn unsigned_integer(&mut self, value: u64) -> Result<()> {
        self.prefix(Kind::Uint64)?;
        self.bytes.u64_le(value);
        Ok(())
    }

    fn int8(&mut self, value: i8) -> Result<()> {
        self.prefix(Kind::Int8)?;
        self.bytes.put(value as u8);
        Ok(())
    }

    fn int16(&mut self, value: i16) -> Result<()> {
        self.prefix(Kind::Int16)?;
        self.bytes.write(&value.to_le_bytes());
        Ok(())
    }

    fn int32(&mut self, value: i32) -> Result<()> {
        self.prefix(Kind::Int32)?;
        self.bytes.write(&value.to_le_bytes());
        Ok(())
    }

    fn uint8(&mut self, value: u8) -> Result<()> {
        self.prefix(Kind::Uint8)?;
        self.bytes.put(value);
        Ok(())
    }

    fn uint16(&mut self, value: u16) -> Result<()> {
        self.prefix(Kind::Uint16)?;
        self.bytes.u16_le(value);
        Ok(())
    }

    fn uint32(&mut self, value: u32) -> Result<()> {
        self.prefix(Kind::Uint32)?;
        self.bytes.u32_le(value);
        Ok(())
    }

    fn real(&mut self, value: f64) -> Result<()> {
        self.prefix(Kind::Double)?;
        self.bytes.f64_le(value);
        Ok(())
    }

    fn string(&mut self, value: &str) -> Result<()> {
        self.raw(value.as_bytes())
    }

    fn binary(&mut self, value: &[u8]) -> Result<()> {
        self.raw(value)
    }

    fn start_array(&mut self, count: usize) -> Result<()> {
        self.prefix(Kind::Array)?;
        let mut element = None;
        if count == 0 {
            self.bytes.put(Tag::array_of(Kind::Uint8).to_byte());
            self.varint(0)?;
            element = Some(Kind::Uint8);
        }
        self.stack.push(Frame::Array {
            count,
            written: 0,
            element,
        });
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array { count, written, .. }) if count == written => Ok(()),
            _ => Err(WireError::Traversal("array closed before all elements were written")),
        }
    }

    fn start_object(&mut self, count: usize) -> Result<()> {
        if self.stack.is_empty() {
            if self.started {
                return Err(WireError::Traversal("second root object"));
            }
            self.started = true;
            self.bytes.reserve(HEADER_SIZE + 1);
            self.bytes.u32_le(SIGNATURE_A);
            self.bytes.u32_le(SIGNATURE_B);
            self.bytes.put(FORMAT_VERSION);
        } else {
            self.prefix(Kind::Object)?;
        }
        self.varint(count)?;
        self.stack.push(Frame::Object {
            remaining: count,
            awaiting_value: false,
        });
        Ok(())
    }

    fn key(&mut self, name: &str) -> Result<()> {
        self.name(name.as_bytes())
    }

    fn binary_key(&mut self, name: &[u8]) -> Result<()> {
        self.name(name)
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object {
                remaining: 0,
                awaiting_value: false,
            }) => Ok(()),
            _ => Err(WireError::Traversal("object closed before all fields were written")),
        }
    }
}
