//! Signer and verifier configuration.
//!
//! Configuration picks the domain and V convention for a signer/verifier pair
//! and names the expected signer. The private key is never part of it; it is
//! always handed to [`Signer::new`](crate::Signer::new) directly.

use serde::{Deserialize, Serialize};

use ecsig_primitives::ec::VConvention;
use ecsig_primitives::Address;

use crate::{Domain, MessageError};

/// Configuration for a [`Signer`](crate::Signer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Domain used by [`Signer::sign_message`](crate::Signer::sign_message).
    pub domain: Domain,
    /// How V is rendered in the produced components.
    pub v_convention: VConvention,
}

impl SignerConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration for a [`Verifier`](crate::Verifier).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Domain the paired signer signs under.
    pub domain: Domain,
    /// Address the signatures are expected to come from.
    pub expected_signer: Option<Address>,
}

impl VerifierConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }
}
