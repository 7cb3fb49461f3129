//! 20-byte account address.
//!
//! The address of a public key is the last 20 bytes of the Keccak-256 hash of
//! its uncompressed encoding (without the 0x04 tag). Text input is accepted in
//! any letter case; output uses the EIP-55 mixed-case checksum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ec::public_key::PublicKey;
use crate::hash::keccak256;
use crate::util::strip_hex_prefix;
use crate::PrimitivesError;

/// Size of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte address identifying a signer.
///
/// Equality is byte equality, so two textual renderings that differ only in
/// letter case compare equal once parsed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Create an address from raw bytes.
    pub fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }

    /// Derive the address of a public key.
    pub fn from_public_key(pub_key: &PublicKey) -> Self {
        let uncompressed = pub_key.to_uncompressed();
        let hash = keccak256(&uncompressed[1..]);
        let mut out = [0u8; ADDRESS_SIZE];
        out.copy_from_slice(&hash[12..]);
        Address(out)
    }

    /// Parse an address from hex.
    ///
    /// The `0x` prefix is optional and letter case is ignored, so both
    /// lowercase and checksummed renderings are accepted.
    ///
    /// # Returns
    /// `Ok(Address)` on success, or `InvalidAddress` for wrong length or non-hex input.
    pub fn from_hex(s: &str) -> Result<Self, PrimitivesError> {
        let digits = strip_hex_prefix(s.trim());
        if digits.len() != ADDRESS_SIZE * 2 {
            return Err(PrimitivesError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                ADDRESS_SIZE * 2,
                digits.len()
            )));
        }
        let bytes =
            hex::decode(digits).map_err(|e| PrimitivesError::InvalidAddress(e.to_string()))?;
        let mut out = [0u8; ADDRESS_SIZE];
        out.copy_from_slice(&bytes);
        Ok(Address(out))
    }

    /// Access the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Render the address with the EIP-55 mixed-case checksum.
    ///
    /// A hex letter is uppercased when the matching nibble of
    /// `keccak256(lowercase_hex)` is 8 or more.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_hex(s)
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }
}

/// Serialize as the checksummed hex string.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

/// Deserialize from a hex string in any letter case.
impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
