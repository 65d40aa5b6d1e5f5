//! Byte level scanning helpers.

use super::error::JsonError;

/// Position of the `"` closing a string whose contents start at `x`.
///
/// An escaped quote does not terminate the string; a double backslash
/// cancels the escape.
pub fn find_ending_quote(data: &[u8], mut x: usize) -> Result<usize, JsonError> {
    let start = x;
    let mut prev = 0u8;
    while let Some(&ch) = data.get(x) {
        if ch == b'"' && prev != b'\\' {
            return Ok(x);
        }
        prev = if ch == b'\\' && prev == b'\\' { 0 } else { ch };
        x += 1;
    }
    Err(JsonError::StringMissQuotation(start))
}

/// JSON insignificant whitespace.
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Length of the number token at the start of `data`. Validation happens
/// when the token is parsed.
pub fn number_length(data: &[u8]) -> usize {
    data.iter()
        .position(|byte| !matches!(byte, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E'))
        .unwrap_or(data.len())
}
