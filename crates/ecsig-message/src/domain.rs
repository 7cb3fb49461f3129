//! Message hashing domains.
//!
//! The domain decides how a message is turned into the 32-byte digest that
//! gets signed. Different domains give unrelated digests for the same
//! message, so a signature made under one domain never recovers the signer
//! under another.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ecsig_primitives::hash::{hash_personal_message, keccak256};
use ecsig_primitives::util::decode_hex;

use crate::MessageError;

/// How a message is hashed before signing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// `keccak256(message)`, signed as-is.
    Raw,
    /// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`.
    Personal,
    /// The raw digest of the message, signed as a 32-byte personal message:
    /// `keccak256("\x19Ethereum Signed Message:\n32" || keccak256(message))`.
    ///
    /// This is what a contract that hashes its packed input and then applies
    /// the personal-message prefix before `ecrecover` expects.
    #[default]
    PersonalDigest,
}

impl Domain {
    /// Compute the digest of `message` under this domain.
    ///
    /// Pure and deterministic.
    pub fn digest(&self, message: &[u8]) -> [u8; 32] {
        match self {
            Domain::Raw => keccak256(message),
            Domain::Personal => hash_personal_message(message),
            Domain::PersonalDigest => hash_personal_message(&keccak256(message)),
        }
    }

    /// The snake_case name used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Raw => "raw",
            Domain::Personal => "personal",
            Domain::PersonalDigest => "personal_digest",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Domain::Raw),
            "personal" => Ok(Domain::Personal),
            "personal_digest" => Ok(Domain::PersonalDigest),
            other => Err(MessageError::Config(format!("unknown domain '{}'", other))),
        }
    }
}

/// Decode a hex-encoded message (with or without `0x`) into its bytes.
///
/// Use this when the payload to sign is binary data handed over as hex rather
/// than a UTF-8 string.
///
/// # Returns
/// The message bytes, or an `Encoding` error for malformed hex.
pub fn message_from_hex(s: &str) -> Result<Vec<u8>, MessageError> {
    Ok(decode_hex(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domains_give_distinct_digests() {
        let message = b"12";
        let raw = Domain::Raw.digest(message);
        let personal = Domain::Personal.digest(message);
        let personal_digest = Domain::PersonalDigest.digest(message);

        assert_ne!(raw, personal);
        assert_ne!(raw, personal_digest);
        assert_ne!(personal, personal_digest);
    }

    #[test]
    fn test_personal_digest_composition() {
        let message = b"12";
        let inner = keccak256(message);
        assert_eq!(
            Domain::PersonalDigest.digest(message),
            Domain::Personal.digest(&inner)
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        for domain in [Domain::Raw, Domain::Personal, Domain::PersonalDigest] {
            assert_eq!(domain.digest(b"Test Data"), domain.digest(b"Test Data"));
        }
    }

    #[test]
    fn test_domain_names() {
        for domain in [Domain::Raw, Domain::Personal, Domain::PersonalDigest] {
            assert_eq!(domain.to_string().parse::<Domain>().unwrap(), domain);
            let json = serde_json::to_string(&domain).unwrap();
            assert_eq!(json, format!("\"{}\"", domain));
        }
        assert!(matches!("eip712".parse::<Domain>(), Err(MessageError::Config(_))));
        assert_eq!(Domain::default(), Domain::PersonalDigest);
    }

    #[test]
    fn test_message_from_hex() {
        assert_eq!(message_from_hex("0x3132").unwrap(), b"12".to_vec());
        assert!(matches!(message_from_hex("0x313"), Err(MessageError::Encoding(_))));
        assert!(matches!(message_from_hex("hello"), Err(MessageError::Encoding(_))));
    }
}
