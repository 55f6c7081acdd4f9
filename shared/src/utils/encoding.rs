//! String encoding helpers

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Encode the UTF-8 bytes of `value` as padded standard base64.
pub fn to_base64(value: &str) -> String {
    BASE64.encode(value.as_bytes())
}

/// Decode a value produced by [`to_base64`].
///
/// Returns `None` when the input is not valid base64 or does not decode to UTF-8.
pub fn from_base64(encoded: &str) -> Option<String> {
    let bytes = BASE64.decode(encoded.trim()).ok()?;
    String::from_utf8(bytes).ok()
}
