//! Short renderings of input bytes for diagnostics.

use std::borrow::Cow;
use std::fmt::Write;

/// Formats up to `max` leading bytes as space separated hex.
///
/// ```
/// use wire_buffers::hex_snippet;
///
/// assert_eq!(hex_snippet(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(hex_snippet(&[1, 2, 3], 2), "01 02 ... (1 more)");
/// ```
pub fn hex_snippet(bytes: &[u8], max: usize) -> String {
    let mut out = String::with_capacity(bytes.len().min(max) * 3);
    for (index, byte) in bytes.iter().take(max).enumerate() {
        if index != 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    if bytes.len() > max {
        let _ = write!(out, " ... ({} more)", bytes.len() - max);
    }
    out
}

/// Renders up to `max` leading bytes as text, replacing invalid UTF-8.
pub fn text_snippet(bytes: &[u8], max: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(&bytes[..bytes.len().min(max)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_snippet_empty() {
        assert_eq!(hex_snippet(&[], 16), "");
    }

    #[test]
    fn hex_snippet_truncates() {
        let data: Vec<u8> = (0..20).collect();
        let result = hex_snippet(&data, 10);
        assert!(result.starts_with("00 01 02"));
        assert!(result.ends_with("... (10 more)"));
        assert_eq!(result.len(), 10 * 3 - 1 + " ... (10 more)".len());
    }

    #[test]
    fn hex_snippet_pads_each_byte() {
        assert_eq!(hex_snippet(&[0x00, 0x0f, 0xf0], 3), "00 0f f0");
        assert_eq!(hex_snippet(&[0xab], 0), " ... (1 more)");
    }

    #[test]
    fn text_snippet_is_lossy() {
        assert_eq!(text_snippet(b"{\"key\": 1}", 4), "{\"ke");
        assert_eq!(text_snippet(&[b'a', 0xff], 8), "a\u{fffd}");
    }
}
