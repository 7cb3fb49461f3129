//! The (R, S, V) signature triple and its text and wire formats.
//!
//! Text format: R and S as `0x` + 64 hex characters each, V as a decimal
//! integer. Wire format: `0x` + 130 hex characters, `R || S || V`.

use std::fmt;

use serde::{Deserialize, Serialize};

use ecsig_primitives::ec::{Signature, VConvention};
use ecsig_primitives::util::{decode_hex_array, encode_hex_prefixed};

use crate::MessageError;

/// The three components of a signature as handed to a verifier.
///
/// V is kept exactly as produced or received; it is normalized to a
/// recovery index only when the components are turned into a [`Signature`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureComponents {
    /// R scalar, 32 bytes big-endian.
    #[serde(with = "hex_scalar")]
    pub r: [u8; 32],
    /// S scalar, 32 bytes big-endian.
    #[serde(with = "hex_scalar")]
    pub s: [u8; 32],
    /// Recovery value in whichever convention the producer used.
    pub v: u64,
}

mod hex_scalar {
    use serde::{Deserialize, Deserializer, Serializer};

    use ecsig_primitives::util::{decode_hex_array, encode_hex_prefixed};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_hex_prefixed(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode_hex_array(&s, "scalar").map_err(serde::de::Error::custom)
    }
}

impl SignatureComponents {
    /// Split a signature into components, rendering V under `convention`.
    ///
    /// # Returns
    /// The components, or an `Encoding` error if the chain id of an
    /// `Eip155` convention is too large to encode in V.
    pub fn from_signature(sig: &Signature, convention: VConvention) -> Result<Self, MessageError> {
        Ok(SignatureComponents {
            r: *sig.r(),
            s: *sig.s(),
            v: sig.v(convention)?,
        })
    }

    /// Normalize V and rebuild the signature.
    ///
    /// # Returns
    /// The signature, or `InvalidSignature` if V is not a supported value.
    pub fn to_signature(&self) -> Result<Signature, MessageError> {
        Ok(Signature::from_parts(self.r, self.s, self.v)?)
    }

    /// Parse the component text format.
    ///
    /// # Arguments
    /// * `r` - `0x` + 64 hex characters (prefix optional).
    /// * `s` - `0x` + 64 hex characters (prefix optional).
    /// * `v` - Decimal integer, e.g. `"28"`.
    ///
    /// # Returns
    /// The components, or an `Encoding` error for wrong-length or non-hex R/S
    /// or a non-decimal V.
    pub fn from_text(r: &str, s: &str, v: &str) -> Result<Self, MessageError> {
        let r = decode_hex_array::<32>(r, "R")?;
        let s = decode_hex_array::<32>(s, "S")?;
        let v = v
            .trim()
            .parse::<u64>()
            .map_err(|e| MessageError::Encoding(format!("V must be a decimal integer: {}", e)))?;
        Ok(SignatureComponents { r, s, v })
    }

    /// R as `0x` + 64 lowercase hex characters.
    pub fn r_hex(&self) -> String {
        encode_hex_prefixed(&self.r)
    }

    /// S as `0x` + 64 lowercase hex characters.
    pub fn s_hex(&self) -> String {
        encode_hex_prefixed(&self.s)
    }

    /// Parse the 65-byte wire format (`0x` + 130 hex characters).
    ///
    /// V is taken from the last byte as-is, without normalization.
    pub fn from_wire_hex(hex_str: &str) -> Result<Self, MessageError> {
        let bytes = decode_hex_array::<65>(hex_str, "signature")?;
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(SignatureComponents {
            r,
            s,
            v: u64::from(bytes[64]),
        })
    }

    /// Serialize to the 65-byte wire format (`0x` + 130 hex characters).
    ///
    /// # Returns
    /// The hex string, or an `Encoding` error if V does not fit in one byte.
    pub fn to_wire_hex(&self) -> Result<String, MessageError> {
        let v = u8::try_from(self.v)
            .map_err(|_| MessageError::Encoding(format!("v={} does not fit in one byte", self.v)))?;
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = v;
        Ok(encode_hex_prefixed(&bytes))
    }
}

impl fmt::Debug for SignatureComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureComponents")
            .field("r", &self.r_hex())
            .field("s", &self.s_hex())
            .field("v", &self.v)
            .finish()
    }
}
