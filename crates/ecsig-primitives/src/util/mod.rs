//! Hex helpers for the "0x"-prefixed text formats.
//!
//! Signature components, addresses and hex-encoded messages all travel as
//! lowercase or mixed-case hex with an optional `0x` prefix. These helpers
//! keep the prefix handling and length checks in one place.

use crate::PrimitivesError;

/// Strip a leading `0x` or `0X` from a hex string, if present.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string, with or without the `0x` prefix.
///
/// # Arguments
/// * `s` - Hex string. Must have an even number of digits.
///
/// # Returns
/// The decoded bytes, or an `Encoding` error for odd lengths or bad characters.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    Ok(hex::decode(strip_hex_prefix(s))?)
}

/// Decode a hex string into exactly `N` bytes.
///
/// # Arguments
/// * `s` - Hex string, optionally `0x`-prefixed.
/// * `what` - Name of the field being decoded, used in the error message.
///
/// # Returns
/// A fixed-size array, or an `Encoding` error if the decoded length is not `N`.
pub fn decode_hex_array<const N: usize>(s: &str, what: &str) -> Result<[u8; N], PrimitivesError> {
    let bytes = decode_hex(s)?;
    if bytes.len() != N {
        return Err(PrimitivesError::Encoding(format!(
            "{} must be {} bytes, got {}",
            what,
            N,
            bytes.len()
        )));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Encode bytes as lowercase hex with a `0x` prefix.
pub fn encode_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
