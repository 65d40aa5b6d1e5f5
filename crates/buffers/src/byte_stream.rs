//! Growable output buffer.

/// An append-only byte buffer used by the binary writers.
///
/// # Example
///
/// ```
/// use wire_buffers::ByteStream;
///
/// let mut out = ByteStream::new();
/// out.put(0x01);
/// out.u16_le(0x0302);
/// out.write(b"ok");
/// assert_eq!(out.into_vec(), vec![0x01, 0x02, 0x03, b'o', b'k']);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteStream {
    bytes: Vec<u8>,
}

impl ByteStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn reserve(&mut self, additional: usize) {
        self.bytes.reserve(additional);
    }

    /// Appends one byte.
    pub fn put(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Appends `count` copies of `byte`.
    pub fn put_n(&mut self, byte: u8, count: usize) {
        self.bytes.resize(self.bytes.len() + count, byte);
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn u16_le(&mut self, value: u16) {
        self.write(&value.to_le_bytes());
    }

    pub fn u32_le(&mut self, value: u32) {
        self.write(&value.to_le_bytes());
    }

    pub fn u64_le(&mut self, value: u64) {
        self.write(&value.to_le_bytes());
    }

    pub fn f64_le(&mut self, value: f64) {
        self.write(&value.to_le_bytes());
    }

    /// Discards the contents, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Takes the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<ByteStream> for Vec<u8> {
    fn from(stream: ByteStream) -> Self {
        stream.into_vec()
    }
}
