//! JSON writer.

use serde::Serialize;

use crate::error::{fail, Result, WireError};
use crate::write::Writer;

use super::error::JsonError;

/// Writes compact JSON.
///
/// Scalars and string escapes go through `serde_json`. Reals keep a
/// fractional part (`0.0`, not `0`) so they read back as reals.
#[derive(Debug, Default)]
pub struct JsonWriter {
    bytes: Vec<u8>,
    depth: usize,
    needs_comma: bool,
    after_key: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document once every container is closed.
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.depth != 0 || self.after_key {
            return Err(WireError::Traversal("JSON document was not written completely"));
        }
        Ok(self.bytes)
    }

    fn before_value(&mut self) {
        if self.after_key {
            self.after_key = false;
        } else if self.needs_comma {
            self.bytes.push(b',');
        }
    }

    fn serialize<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.before_value();
        let offset = self.bytes.len();
        if let Err(error) = serde_json::to_writer(&mut self.bytes, value) {
            return fail(
                JsonError::Parse {
                    offset,
                    message: error.to_string(),
                },
                format_args!("serializing scalar"),
            );
        }
        self.needs_comma = true;
        Ok(())
    }

    fn open(&mut self, byte: u8) {
        self.before_value();
        self.bytes.push(byte);
        self.depth += 1;
        self.needs_comma = false;
    }

    fn close(&mut self, byte: u8) -> Result<()> {
        if self.depth == 0 || self.after_key {
            return Err(WireError::Traversal("container closed without being opened"));
        }
        self.bytes.push(byte);
        self.depth -= 1;
        self.needs_comma = true;
        Ok(())
    }

    fn name<T: Serialize + ?Sized>(&mut self, name: &T) -> Result<()> {
        if self.depth == 0 || self.after_key {
            return Err(WireError::Traversal("key written outside of an object"));
        }
        self.serialize(name)?;
        self.bytes.push(b':');
        self.needs_comma = false;
        self.after_key = true;
        Ok(())
    }
}

impl Writer for JsonWriter {
    fn null(&mut self) -> Result<()> {
        self.serialize(&())
    }

    fn boolean(&mut self, value: bool) -> Result<()> {
        self.serialize(&value)
    }

    fn integer(&mut self, value: i64) -> Result<()> {
        self.serialize(&value)
    }

    fn unsigned_integer(&mut self, value: u64) -> Result<()> {
        self.serialize(&value)
    }

    fn real(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return fail(JsonError::NonFinite, format_args!("value {value}"));
        }
        self.serialize(&value)
    }

    fn string(&mut self, value: &str) -> Result<()> {
        self.serialize(value)
    }

    fn binary(&mut self, value: &[u8]) -> Result<()> {
        self.serialize(&hex::encode(value))
    }

    fn start_array(&mut self, _count: usize) -> Result<()> {
        self.open(b'[');
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.close(b']')
    }

    fn start_object(&mut self, _count: usize) -> Result<()> {
        self.open(b'{');
        Ok(())
    }

    fn key(&mut self, name: &str) -> Result<()> {
        self.name(name)
    }

    fn binary_key(&mut self, name: &[u8]) -> Result<()> {
        self.name(&hex::encode(name))
    }

    fn end_object(&mut self) -> Result<()> {
        self.close(b'}')
    }
}
