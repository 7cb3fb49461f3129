use ecsig_primitives::PrimitivesError;

/// Error types for message signing and verification.
///
/// A signature that simply does not match is not an error; see
/// [`verify`](crate::verify).
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// Malformed or wrong-length byte/hex input at any boundary.
    #[error("encoding error: {0}")]
    Encoding(String),
    /// Curve arithmetic failed while signing.
    #[error("signing error: {0}")]
    Signing(String),
    /// Structurally invalid signature components or failed key recovery.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    /// Missing or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<PrimitivesError> for MessageError {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::Signing(msg) => MessageError::Signing(msg),
            PrimitivesError::InvalidSignature(msg) => MessageError::InvalidSignature(msg),
            PrimitivesError::Encoding(msg) => MessageError::Encoding(msg),
            PrimitivesError::InvalidPrivateKey(_)
            | PrimitivesError::InvalidPublicKey(_)
            | PrimitivesError::InvalidAddress(_) => MessageError::Encoding(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for MessageError {
    fn from(e: serde_json::Error) -> Self {
        MessageError::Config(e.to_string())
    }
}
