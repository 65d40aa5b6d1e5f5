//! Byte buffer utilities for the wire serialization engine.
//!
//! - [`Span`] - bounds checked, front consuming view over borrowed bytes
//! - [`ByteStream`] - growable output buffer
//! - [`hex_snippet`] / [`text_snippet`] - short renderings for diagnostics
//!
//! # Example
//!
//! ```
//! use wire_buffers::{ByteStream, Span};
//!
//! let mut out = ByteStream::new();
//! out.put(0x01);
//! out.u32_le(0x0506_0708);
//! out.write(b"hello");
//! let data = out.into_vec();
//!
//! let mut span = Span::new(&data);
//! assert_eq!(span.u8(), Ok(0x01));
//! assert_eq!(span.u32_le(), Ok(0x0506_0708));
//! assert_eq!(span.utf8(5), Ok("hello"));
//! assert!(span.is_empty());
//! ```

mod byte_stream;
mod snippet;
mod span;

pub use byte_stream::ByteStream;
pub use snippet::{hex_snippet, text_snippet};
pub use span::Span;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
        }
    }
}

impl std::error::Error for BufferError {}
