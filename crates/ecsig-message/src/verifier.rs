//! Signer recovery and verification.
//!
//! Verification recovers the public key from (R, S, V) and the message
//! digest, derives its address and compares it with the expected signer.
//! Structurally invalid input (bad V, zero or out-of-range scalars, high S)
//! is an error; a well-formed signature from someone else is `Ok(false)`.

use tracing::debug;

use ecsig_primitives::ec::PublicKey;
use ecsig_primitives::Address;

use crate::{Domain, MessageError, SignatureComponents, VerifierConfig};

/// Recover the public key that signed `message` under `domain`.
///
/// # Errors
/// Returns [`MessageError::InvalidSignature`] if V is not a supported value,
/// R or S is zero or not below the curve order, S is in the upper half of
/// the order, or no curve point can be recovered.
pub fn recover_public_key(
    message: &[u8],
    domain: Domain,
    components: &SignatureComponents,
) -> Result<PublicKey, MessageError> {
    recover_public_key_digest(&domain.digest(message), components)
}

/// Recover the public key that signed a digest the caller already computed.
///
/// Counterpart of [`Signer::sign_digest`](crate::Signer::sign_digest).
pub fn recover_public_key_digest(
    digest: &[u8; 32],
    components: &SignatureComponents,
) -> Result<PublicKey, MessageError> {
    let signature = components.to_signature()?;
    Ok(signature.recover_public_key(digest)?)
}

/// Recover the address that signed `digest`.
pub fn recover_signer_digest(
    digest: &[u8; 32],
    components: &SignatureComponents,
) -> Result<Address, MessageError> {
    Ok(recover_public_key_digest(digest, components)?.to_address())
}

/// Check that `components` is a signature by `expected` over `digest`.
///
/// Same outcomes as [`verify`], without hashing.
pub fn verify_digest(
    digest: &[u8; 32],
    components: &SignatureComponents,
    expected: &Address,
) -> Result<bool, MessageError> {
    let recovered = recover_signer_digest(digest, components)?;
    let valid = recovered == *expected;
    debug!(
        recovered = %recovered,
        expected = %expected,
        valid,
        "verified digest signature"
    );
    Ok(valid)
}

/// Recover the address that signed `message` under `domain`.
pub fn recover_signer(
    message: &[u8],
    domain: Domain,
    components: &SignatureComponents,
) -> Result<Address, MessageError> {
    let address = recover_signer_digest(&domain.digest(message), components)?;
    debug!(domain = %domain, recovered = %address, "recovered signer");
    Ok(address)
}

/// Check that `components` is a signature by `expected` over `message`.
///
/// Addresses compare by their 20 bytes, so checksum case never matters.
///
/// # Returns
/// `Ok(true)` when the recovered address equals `expected`, `Ok(false)` when
/// it does not, or an `InvalidSignature` error when nothing can be recovered.
pub fn verify(
    message: &[u8],
    domain: Domain,
    components: &SignatureComponents,
    expected: &Address,
) -> Result<bool, MessageError> {
    let recovered = recover_signer(message, domain, components)?;
    let valid = recovered == *expected;
    debug!(
        domain = %domain,
        recovered = %recovered,
        expected = %expected,
        valid,
        "verified signature"
    );
    Ok(valid)
}

/// Verifier bound to the domain and signer of one signer/verifier pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    /// Create a verifier from its configuration.
    pub fn new(config: VerifierConfig) -> Self {
        Verifier { config }
    }

    /// Verifier for `expected` signing under `domain`.
    pub fn for_signer(domain: Domain, expected: Address) -> Self {
        Verifier::new(VerifierConfig {
            domain,
            expected_signer: Some(expected),
        })
    }

    /// Configuration this verifier was built with.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Recover the signer of `message` under the configured domain.
    pub fn recover(
        &self,
        message: &[u8],
        components: &SignatureComponents,
    ) -> Result<Address, MessageError> {
        recover_signer(message, self.config.domain, components)
    }

    /// Verify `message` against the configured expected signer.
    ///
    /// # Errors
    /// Returns [`MessageError::Config`] if no expected signer is configured,
    /// otherwise the same errors as [`verify`].
    pub fn check(
        &self,
        message: &[u8],
        components: &SignatureComponents,
    ) -> Result<bool, MessageError> {
        let expected = self.expected_signer()?;
        verify(message, self.config.domain, components, &expected)
    }

    /// Verify a precomputed digest against the configured expected signer.
    ///
    /// The configured domain is not applied; `digest` is used as given.
    pub fn check_digest(
        &self,
        digest: &[u8; 32],
        components: &SignatureComponents,
    ) -> Result<bool, MessageError> {
        let expected = self.expected_signer()?;
        verify_digest(digest, components, &expected)
    }

    fn expected_signer(&self) -> Result<Address, MessageError> {
        self.config.expected_signer.ok_or_else(|| {
            MessageError::Config("verifier has no expected signer".to_string())
        })
    }
}
