/// Unified error type for all primitives operations.
///
/// Covers errors from hex decoding, key parsing, signing and signature recovery.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::Encoding(e.to_string())
    }
}
