//! Message signer.
//!
//! Owns one private key for its whole lifetime. Every call is an independent
//! pure computation over that key, so a `Signer` can be shared between
//! threads behind an `Arc` without locking.

use std::fmt;

use tracing::debug;

use ecsig_primitives::ec::{PrivateKey, PublicKey};
use ecsig_primitives::Address;

use crate::{Domain, MessageError, SignatureComponents, SignerConfig};

/// Signs messages with a single private key and returns (R, S, V).
#[derive(Clone)]
pub struct Signer {
    key: PrivateKey,
    address: Address,
    config: SignerConfig,
}

impl Signer {
    /// Create a signer for `key`.
    pub fn new(key: PrivateKey, config: SignerConfig) -> Self {
        let address = key.address();
        Signer {
            key,
            address,
            config,
        }
    }

    /// Address of the signing key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Public key of the signing key.
    pub fn public_key(&self) -> PublicKey {
        self.key.pub_key()
    }

    /// Configuration this signer was built with.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Hash `message` under `domain`, sign the digest and split the signature.
    ///
    /// Signing is deterministic (RFC6979): the same key, message and domain
    /// always give the same components. V follows the configured convention.
    ///
    /// # Errors
    /// Returns [`MessageError::Signing`] if curve arithmetic fails, or
    /// [`MessageError::Encoding`] if the configured chain id is too large to
    /// encode in V.
    pub fn sign(&self, message: &[u8], domain: Domain) -> Result<SignatureComponents, MessageError> {
        let digest = domain.digest(message);
        let components = self.sign_digest(&digest)?;
        debug!(
            domain = %domain,
            signer = %self.address,
            message_len = message.len(),
            v = components.v,
            "signed message"
        );
        Ok(components)
    }

    /// Sign `message` under the configured domain.
    pub fn sign_message(&self, message: &[u8]) -> Result<SignatureComponents, MessageError> {
        self.sign(message, self.config.domain)
    }

    /// Sign a digest the caller has already computed.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<SignatureComponents, MessageError> {
        let signature = self.key.sign_digest(digest)?;
        SignatureComponents::from_signature(&signature, self.config.v_convention)
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
