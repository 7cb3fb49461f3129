//! Recoverable ECDSA signature with RFC6979 deterministic nonces.
//!
//! A signature is the pair of scalars (R, S) plus a recovery index that
//! selects which of the two candidate public keys produced it. On the wire it
//! is 65 bytes: `R (32) || S (32) || V (1)`, where V is the recovery index
//! rendered in one of the [`VConvention`]s.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::util::{decode_hex, encode_hex_prefixed};
use crate::PrimitivesError;

/// Length of the wire-format signature: R, S and a one-byte V.
pub const SIGNATURE_BYTES_LEN: usize = 65;

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2), the upper bound for a low-S value.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// First V of the legacy convention (recovery index 0).
const LEGACY_V_BASE: u64 = 27;

/// First V of the chain-id-offset convention: `35 + 2 * chain_id + index`.
const EIP155_V_BASE: u64 = 35;

/// How a recovery index (0 or 1) is rendered as V.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VConvention {
    /// V is the bare recovery index: 0 or 1.
    Index,
    /// V is 27 or 28, as produced by personal-message signing tools and
    /// expected by on-chain `ecrecover`.
    #[default]
    Legacy,
    /// V is offset by a chain id: `35 + 2 * chain_id + index`.
    Eip155 {
        /// Chain id folded into V.
        chain_id: u64,
    },
}

impl VConvention {
    /// Render a recovery index under this convention.
    ///
    /// # Arguments
    /// * `index` - Recovery index, 0 or 1. Only the low bit is used.
    ///
    /// # Returns
    /// The V value, or an `Encoding` error if the chain id is so large that
    /// `35 + 2 * chain_id + 1` overflows a `u64`. The check does not depend
    /// on `index`, so a chain id either encodes both indices or neither.
    pub fn encode(&self, index: u8) -> Result<u64, PrimitivesError> {
        let index = u64::from(index & 1);
        match self {
            VConvention::Index => Ok(index),
            VConvention::Legacy => Ok(LEGACY_V_BASE + index),
            VConvention::Eip155 { chain_id } => {
                let base = chain_id
                    .checked_mul(2)
                    .and_then(|v| v.checked_add(EIP155_V_BASE))
                    .filter(|v| v.checked_add(1).is_some())
                    .ok_or_else(|| {
                        PrimitivesError::Encoding(format!(
                            "chain id {} is too large to encode in v",
                            chain_id
                        ))
                    })?;
                Ok(base + index)
            }
        }
    }
}

/// Normalize a V value from any supported convention to a recovery index.
///
/// 0 and 1 are taken as-is, 27 and 28 map to 0 and 1, and any value of 35 or
/// more is treated as chain-id-offset (`(v - 35) % 2`).
///
/// # Returns
/// The recovery index (0 or 1), or an `InvalidSignature` error for any other value.
pub fn recovery_index(v: u64) -> Result<u8, PrimitivesError> {
    match v {
        0 | 1 => Ok(v as u8),
        27 | 28 => Ok((v - LEGACY_V_BASE) as u8),
        v if v >= EIP155_V_BASE => Ok(((v - EIP155_V_BASE) % 2) as u8),
        _ => Err(PrimitivesError::InvalidSignature(format!(
            "invalid recovery value v={}",
            v
        ))),
    }
}

/// An ECDSA signature with R, S and a normalized recovery index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
    /// Recovery index, always 0 or 1.
    recovery_id: u8,
}

impl Signature {
    /// Build a signature from its three components.
    ///
    /// V may use any supported convention; it is normalized here. R and S are
    /// not range-checked until the signature is used for recovery or
    /// verification.
    ///
    /// # Arguments
    /// * `r` - The R component (32 bytes, big-endian).
    /// * `s` - The S component (32 bytes, big-endian).
    /// * `v` - The recovery value in any supported convention.
    pub fn from_parts(r: [u8; 32], s: [u8; 32], v: u64) -> Result<Self, PrimitivesError> {
        Ok(Signature {
            r,
            s,
            recovery_id: recovery_index(v)?,
        })
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// The normalized recovery index (0 or 1).
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Render the recovery index as V under the given convention.
    pub fn v(&self, convention: VConvention) -> Result<u64, PrimitivesError> {
        convention.encode(self.recovery_id)
    }

    /// Parse a 65-byte wire-format signature.
    ///
    /// Format: `<32-byte R> <32-byte S> <V>`
    ///
    /// # Returns
    /// `Ok(Signature)` on success, an `Encoding` error if the length is wrong,
    /// or an `InvalidSignature` error if V is not a supported value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_BYTES_LEN {
            return Err(PrimitivesError::Encoding(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_BYTES_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self::from_parts(r, s, u64::from(bytes[64]))
    }

    /// Serialize the signature in the 65-byte wire format.
    ///
    /// # Returns
    /// The bytes, or an `Encoding` error if V does not fit in one byte under
    /// the chosen convention (large chain ids).
    pub fn to_bytes(&self, convention: VConvention) -> Result<[u8; SIGNATURE_BYTES_LEN], PrimitivesError> {
        let v = self.v(convention)?;
        let v_byte = u8::try_from(v).map_err(|_| {
            PrimitivesError::Encoding(format!("v={} does not fit in one byte", v))
        })?;
        let mut out = [0u8; SIGNATURE_BYTES_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = v_byte;
        Ok(out)
    }

    /// Parse the hex wire format: `0x` followed by 130 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = decode_hex(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize to the hex wire format: `0x` followed by 130 lowercase hex characters.
    pub fn to_hex(&self, convention: VConvention) -> Result<String, PrimitivesError> {
        Ok(encode_hex_prefixed(&self.to_bytes(convention)?))
    }

    /// Sign a 32-byte digest using RFC6979 deterministic nonces.
    ///
    /// k256 normalizes secp256k1 signatures to low S and adjusts the recovery
    /// id to match, so the result always passes the checks in
    /// [`recover_public_key`](Self::recover_public_key).
    ///
    /// # Arguments
    /// * `digest` - The digest to sign.
    /// * `priv_key` - The private key to sign with.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or a `Signing` error if signing fails.
    pub fn sign(digest: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let (k256_sig, recovery_id) = priv_key
            .signing_key()
            .sign_prehash_recoverable(digest)
            .map_err(|e| PrimitivesError::Signing(e.to_string()))?;

        // The x-reduced bit cannot be expressed by a 0/1 recovery index.
        if recovery_id.is_x_reduced() {
            return Err(PrimitivesError::Signing(
                "recovery id has the x-reduced bit set".to_string(),
            ));
        }

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        Ok(Signature {
            r,
            s,
            recovery_id: recovery_id.to_byte(),
        })
    }

    /// Verify this signature against a digest and public key.
    ///
    /// Applies the same scalar checks as recovery, so a malleated high-S
    /// signature does not verify.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, digest: &[u8; 32], pub_key: &PublicKey) -> bool {
        let k256_sig = match self.to_k256() {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        pub_key
            .verifying_key()
            .verify_prehash(digest, &k256_sig)
            .is_ok()
    }

    /// Recover the public key that produced this signature over `digest`.
    ///
    /// # Returns
    /// `Ok(PublicKey)` if recovery succeeds, or an `InvalidSignature` error if
    /// R or S is zero or out of range, S is in the upper half of the order, or
    /// no valid curve point can be recovered.
    pub fn recover_public_key(&self, digest: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let k256_sig = self.to_k256()?;

        let recovery_id = RecoveryId::from_byte(self.recovery_id)
            .ok_or_else(|| PrimitivesError::InvalidSignature("invalid recovery id".to_string()))?;

        let recovered_key = VerifyingKey::recover_from_prehash(digest, &k256_sig, recovery_id)
            .map_err(|_| {
                PrimitivesError::InvalidSignature("public key recovery failed".to_string())
            })?;

        Ok(PublicKey::from_k256_verifying_key(&recovered_key))
    }

    /// Validate R and S and build the k256 signature.
    fn to_k256(&self) -> Result<ecdsa::Signature, PrimitivesError> {
        if is_zero(&self.r) {
            return Err(PrimitivesError::InvalidSignature(
                "signature R is zero".to_string(),
            ));
        }
        if is_zero(&self.s) {
            return Err(PrimitivesError::InvalidSignature(
                "signature S is zero".to_string(),
            ));
        }
        if !is_less_than(&self.r, &CURVE_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature R is >= curve.N".to_string(),
            ));
        }
        if !is_less_than(&self.s, &CURVE_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature S is >= curve.N".to_string(),
            ));
        }
        if is_greater_than(&self.s, &HALF_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature S is > curve.N/2".to_string(),
            ));
        }

        ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))
    }
}

/// Check if a 32-byte big-endian integer is zero.
fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Compare two 32-byte big-endian integers: a < b.
fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

/// Compare two 32-byte big-endian integers: a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::keccak256;

    fn test_key() -> PrivateKey {
        PrivateKey::from_bytes(&[0xcd; 32]).unwrap()
    }

    /// Compute N - val where N is the secp256k1 curve order.
    fn subtract_from_order(val: &[u8; 32]) -> [u8; 32] {
        let mut result = [0u8; 32];
        let mut borrow: i32 = 0;
        for i in (0..32).rev() {
            let diff = CURVE_ORDER[i] as i32 - val[i] as i32 - borrow;
            if diff < 0 {
                result[i] = (diff + 256) as u8;
                borrow = 1;
            } else {
                result[i] = diff as u8;
                borrow = 0;
            }
        }
        result
    }

    #[test]
    fn test_recovery_index_conventions() {
        assert_eq!(recovery_index(0).unwrap(), 0);
        assert_eq!(recovery_index(1).unwrap(), 1);
        assert_eq!(recovery_index(27).unwrap(), 0);
        assert_eq!(recovery_index(28).unwrap(), 1);

        // Chain id 1: 37 / 38. Chain id 31337: 62709 / 62710.
        assert_eq!(recovery_index(37).unwrap(), 0);
        assert_eq!(recovery_index(38).unwrap(), 1);
        assert_eq!(recovery_index(62709).unwrap(), 0);
        assert_eq!(recovery_index(62710).unwrap(), 1);

        for v in [2u64, 4, 26, 29, 30, 31, 32, 34] {
            assert!(
                matches!(recovery_index(v), Err(PrimitivesError::InvalidSignature(_))),
                "v={} should be rejected",
                v
            );
        }
    }

    #[test]
    fn test_v_convention_encode() {
        assert_eq!(VConvention::Index.encode(0).unwrap(), 0);
        assert_eq!(VConvention::Index.encode(1).unwrap(), 1);
        assert_eq!(VConvention::Legacy.encode(0).unwrap(), 27);
        assert_eq!(VConvention::Legacy.encode(1).unwrap(), 28);
        assert_eq!(VConvention::Eip155 { chain_id: 1 }.encode(0).unwrap(), 37);
        assert_eq!(VConvention::Eip155 { chain_id: 1 }.encode(1).unwrap(), 38);
        assert_eq!(VConvention::default(), VConvention::Legacy);

        for convention in [
            VConvention::Index,
            VConvention::Legacy,
            VConvention::Eip155 { chain_id: 5 },
        ] {
            for index in [0u8, 1] {
                assert_eq!(recovery_index(convention.encode(index).unwrap()).unwrap(), index);
            }
        }
    }

    #[test]
    fn test_v_convention_rejects_overflowing_chain_id() {
        // Largest chain id whose V still fits: 35 + 2 * c + 1 <= u64::MAX.
        let max_chain_id = (u64::MAX - 36) / 2;
        let fits = VConvention::Eip155 { chain_id: max_chain_id };
        assert_eq!(fits.encode(0).unwrap(), u64::MAX - 2);
        assert_eq!(fits.encode(1).unwrap(), u64::MAX - 1);
        assert_eq!(recovery_index(fits.encode(0).unwrap()).unwrap(), 0);
        assert_eq!(recovery_index(fits.encode(1).unwrap()).unwrap(), 1);

        // One past it: index 0 would land exactly on u64::MAX but index 1
        // cannot, so neither is encoded.

        for chain_id in [max_chain_id + 1, u64::MAX / 2, u64::MAX] {
            let convention = VConvention::Eip155 { chain_id };
            for index in [0u8, 1] {
                assert!(
                    matches!(convention.encode(index), Err(PrimitivesError::Encoding(_))),
                    "chain_id={} index={} should not encode",
                    chain_id,
                    index
                );
            }
        }

        let sig = Signature::from_parts([1u8; 32], [1u8; 32], 1).unwrap();
        assert!(matches!(
            sig.v(VConvention::Eip155 { chain_id: u64::MAX / 2 }),
            Err(PrimitivesError::Encoding(_))
        ));
    }

    #[test]
    fn test_v_convention_serde() {
        let json = serde_json::to_string(&VConvention::Eip155 { chain_id: 11155111 }).unwrap();
        assert_eq!(json, r#"{"kind":"eip155","chain_id":11155111}"#);
        let back: VConvention = serde_json::from_str(r#"{"kind":"legacy"}"#).unwrap();
        assert_eq!(back, VConvention::Legacy);
    }

    #[test]
    fn test_sign_and_recover() {
        for i in 1u8..=10 {
            let priv_key = PrivateKey::from_bytes(&[i; 32]).unwrap();
            let digest = keccak256(&[i; 7]);

            let sig = priv_key.sign_digest(&digest).unwrap();
            assert!(sig.recovery_id() <= 1);
            assert!(!is_greater_than(sig.s(), &HALF_ORDER), "S must be low");

            let recovered = sig.recover_public_key(&digest).unwrap();
            assert_eq!(recovered, priv_key.pub_key(), "recovered public key should match");
            assert!(sig.verify(&digest, &priv_key.pub_key()));
        }
    }

    #[test]
    fn test_rfc6979_known_answer() {
        // Private key 1 over sha256("Satoshi Nakamoto"), the widely published
        // secp256k1 RFC6979 vector (already low-S).
        let mut one = [0u8; 32];
        one[31] = 1;
        let priv_key = PrivateKey::from_bytes(&one).unwrap();
        let digest: [u8; 32] =
            hex::decode("a0dc65ffca799873cbea0ac274015b9526505daaaed385155425f7337704883e")
                .unwrap()
                .try_into()
                .unwrap();

        let sig = priv_key.sign_digest(&digest).unwrap();
        assert_eq!(
            hex::encode(sig.r()),
            "934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8"
        );
        assert_eq!(
            hex::encode(sig.s()),
            "2442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5"
        );
        assert_eq!(sig.recover_public_key(&digest).unwrap(), priv_key.pub_key());
    }

    #[test]
    fn test_wire_format_layout() {
        let priv_key = test_key();
        let digest = keccak256(b"layout");
        let sig = priv_key.sign_digest(&digest).unwrap();

        let bytes = sig.to_bytes(VConvention::Legacy).unwrap();
        assert_eq!(&bytes[..32], sig.r());
        assert_eq!(&bytes[32..64], sig.s());
        assert_eq!(u64::from(bytes[64]), 27 + u64::from(sig.recovery_id()));

        let hex_str = sig.to_hex(VConvention::Legacy).unwrap();
        assert!(hex_str.starts_with("0x"));
        assert_eq!(hex_str.len(), 2 + 130);
        assert_eq!(Signature::from_hex(&hex_str).unwrap(), sig);

        // Index convention parses back to the same signature.
        let index_bytes = sig.to_bytes(VConvention::Index).unwrap();
        assert_eq!(Signature::from_bytes(&index_bytes).unwrap(), sig);
    }

    #[test]
    fn test_wire_format_errors() {
        assert!(matches!(
            Signature::from_bytes(&[1u8; 64]),
            Err(PrimitivesError::Encoding(_))
        ));
        assert!(matches!(
            Signature::from_hex(&format!("0x{}", "11".repeat(66))),
            Err(PrimitivesError::Encoding(_))
        ));

        let mut bytes = [1u8; 65];
        bytes[64] = 29;
        assert!(matches!(
            Signature::from_bytes(&bytes),
            Err(PrimitivesError::InvalidSignature(_))
        ));

        // A chain id too large for a one-byte V cannot use the wire format.
        let sig = Signature::from_parts([1u8; 32], [1u8; 32], 0).unwrap();
        assert!(matches!(
            sig.to_bytes(VConvention::Eip155 { chain_id: 1000 }),
            Err(PrimitivesError::Encoding(_))
        ));
        assert!(sig.to_bytes(VConvention::Eip155 { chain_id: 100 }).is_ok());
    }

    #[test]
    fn test_recover_rejects_invalid_scalars() {
        let digest = keccak256(b"scalars");
        let one = {
            let mut b = [0u8; 32];
            b[31] = 1;
            b
        };

        let cases = [
            ([0u8; 32], one, "R is zero"),
            (one, [0u8; 32], "S is zero"),
            (CURVE_ORDER, one, "R is >= curve.N"),
            (one, CURVE_ORDER, "S is >= curve.N"),
            ([0xff; 32], one, "R is >= curve.N"),
        ];

        for (r, s, expected) in cases {
            let sig = Signature::from_parts(r, s, 27).unwrap();
            let err = sig.recover_public_key(&digest).unwrap_err();
            assert!(
                matches!(err, PrimitivesError::InvalidSignature(_)),
                "expected InvalidSignature, got {:?}",
                err
            );
            assert!(err.to_string().contains(expected), "got: {}", err);
        }
    }

    #[test]
    fn test_high_s_counterpart_is_rejected() {
        let priv_key = test_key();
        let digest = keccak256(b"malleability");
        let sig = priv_key.sign_digest(&digest).unwrap();

        // (r, N - s, !v) is the classic malleated form of a valid signature.
        let high_s = subtract_from_order(sig.s());
        let malleated =
            Signature::from_parts(*sig.r(), high_s, u64::from(sig.recovery_id() ^ 1)).unwrap();

        assert!(matches!(
            malleated.recover_public_key(&digest),
            Err(PrimitivesError::InvalidSignature(_))
        ));
        assert!(!malleated.verify(&digest, &priv_key.pub_key()));
    }

    #[test]
    fn test_wrong_recovery_index_recovers_other_key() {
        let priv_key = test_key();
        let digest = keccak256(b"flip v");
        let sig = priv_key.sign_digest(&digest).unwrap();

        let flipped =
            Signature::from_parts(*sig.r(), *sig.s(), u64::from(sig.recovery_id() ^ 1)).unwrap();
        match flipped.recover_public_key(&digest) {
            Ok(other) => assert_ne!(other, priv_key.pub_key()),
            Err(err) => assert!(matches!(err, PrimitivesError::InvalidSignature(_))),
        }
    }

    #[test]
    fn test_subtract_from_order() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let mut expected = CURVE_ORDER;
        expected[31] = 0x40;
        assert_eq!(subtract_from_order(&one), expected);
        assert_eq!(subtract_from_order(&subtract_from_order(&one)), one);
    }
}
