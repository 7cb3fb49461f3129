/// ecsig - Cryptographic primitives for Ethereum-style message signatures.
///
/// This crate provides the building blocks used by `ecsig-message`:
/// - Keccak-256 hashing and personal-message framing
/// - secp256k1 private and public keys
/// - Recoverable ECDSA signatures (R, S and a recovery index)
/// - Recovery value (V) conventions and normalization
/// - 20-byte addresses with EIP-55 checksum rendering
/// - Hex helpers for the "0x"-prefixed text formats

pub mod hash;
pub mod util;
pub mod ec;
pub mod address;

mod error;
pub use error::PrimitivesError;
pub use address::Address;
