#![deny(missing_docs)]

//! ecsig - Domain-separated message signing and signer recovery.
//!
//! A [`Signer`] hashes a message under a [`Domain`], signs the digest and
//! returns the [`SignatureComponents`] (R, S, V). The [`verifier`] functions
//! recompute the digest under the same domain and recover or check the
//! signer's [`Address`](ecsig_primitives::Address).
//!
//! Signer and verifier must agree on the domain; a mismatch is not detected,
//! it simply recovers a different address.

mod error;
pub mod components;
pub mod config;
pub mod domain;
pub mod signer;
pub mod verifier;

pub use error::MessageError;
pub use components::SignatureComponents;
pub use config::{SignerConfig, VerifierConfig};
pub use domain::Domain;
pub use signer::Signer;
pub use verifier::{
    recover_public_key, recover_public_key_digest, recover_signer, recover_signer_digest, verify,
    verify_digest, Verifier,
};
