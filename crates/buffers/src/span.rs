//! Read-only byte view with a consuming front cursor.

use crate::BufferError;

/// A view over a borrowed byte slice that is consumed from the front.
///
/// Every read is bounds checked; running out of bytes yields
/// [`BufferError::EndOfBuffer`] instead of panicking. Multi-byte integers are
/// little-endian.
///
/// # Example
///
/// ```
/// use wire_buffers::Span;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
/// let mut span = Span::new(&data);
///
/// assert_eq!(span.u8(), Ok(0x01));
/// assert_eq!(span.u16_le(), Ok(0x0302));
/// assert_eq!(span.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span<'a> {
    bytes: &'a [u8],
}

impl<'a> Span<'a> {
    /// Creates a span over `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of bytes left in the view.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes that have not been consumed yet.
    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// The next byte without consuming it.
    pub fn first(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Drops up to `count` bytes from the front and returns how many were
    /// actually dropped.
    pub fn remove_prefix(&mut self, count: usize) -> usize {
        let count = count.min(self.bytes.len());
        self.bytes = &self.bytes[count..];
        count
    }

    /// Drops leading bytes while `predicate` holds, returning the count.
    pub fn skip_while(&mut self, mut predicate: impl FnMut(u8) -> bool) -> usize {
        let count = self
            .bytes
            .iter()
            .position(|&byte| !predicate(byte))
            .unwrap_or(self.bytes.len());
        self.remove_prefix(count)
    }

    /// Consumes exactly `count` bytes.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8], BufferError> {
        if self.bytes.len() < count {
            return Err(BufferError::EndOfBuffer);
        }
        let (head, tail) = self.bytes.split_at(count);
        self.bytes = tail;
        Ok(head)
    }

    /// Consumes exactly `N` bytes into an array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8, BufferError> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    pub fn i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.u8()? as i8)
    }

    pub fn u16_le(&mut self) -> Result<u16, BufferError> {
        self.take_array().map(u16::from_le_bytes)
    }

    pub fn i16_le(&mut self) -> Result<i16, BufferError> {
        self.take_array().map(i16::from_le_bytes)
    }

    pub fn u32_le(&mut self) -> Result<u32, BufferError> {
        self.take_array().map(u32::from_le_bytes)
    }

    pub fn i32_le(&mut self) -> Result<i32, BufferError> {
        self.take_array().map(i32::from_le_bytes)
    }

    pub fn u64_le(&mut self) -> Result<u64, BufferError> {
        self.take_array().map(u64::from_le_bytes)
    }

    pub fn i64_le(&mut self) -> Result<i64, BufferError> {
        self.take_array().map(i64::from_le_bytes)
    }

    pub fn f64_le(&mut self) -> Result<f64, BufferError> {
        self.take_array().map(f64::from_le_bytes)
    }

    /// Consumes `count` bytes that must form valid UTF-8.
    pub fn utf8(&mut self, count: usize) -> Result<&'a str, BufferError> {
        let head = self.take(count)?;
        std::str::from_utf8(head).map_err(|_| BufferError::InvalidUtf8)
    }
}

impl<'a> From<&'a [u8]> for Span<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}
