//! Hash function primitives.
//!
//! Provides Keccak-256 (the pre-standard variant used by Ethereum, not NIST
//! SHA3-256) and the personal-message framing that binds a signature to
//! "this was signed as a human-readable message".

use sha3::{Digest, Keccak256};

/// Preamble prepended to every personal message before hashing.
///
/// The decimal byte length of the message follows it, then the message itself.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Compute the Keccak-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte Keccak-256 digest.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Frame a message for the personal-message domain.
///
/// Output layout: `PERSONAL_MESSAGE_PREFIX || decimal(len(message)) || message`.
///
/// # Arguments
/// * `message` - The raw message bytes.
///
/// # Returns
/// The framed bytes that get hashed for a personal-message signature.
pub fn personal_message(message: &[u8]) -> Vec<u8> {
    let length = message.len().to_string();
    let mut framed =
        Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + length.len() + message.len());
    framed.extend_from_slice(PERSONAL_MESSAGE_PREFIX.as_bytes());
    framed.extend_from_slice(length.as_bytes());
    framed.extend_from_slice(message);
    framed
}

/// Compute the personal-message digest: `keccak256(personal_message(message))`.
///
/// # Arguments
/// * `message` - The raw message bytes.
///
/// # Returns
/// A 32-byte digest ready for signing.
pub fn hash_personal_message(message: &[u8]) -> [u8; 32] {
    keccak256(&personal_message(message))
}
