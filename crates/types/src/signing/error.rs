use alloy::primitives::Address;

/// An error that can occur when signing a relay request or verifying its
/// signature token.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// Error signing the request digest.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
    /// The token is not of the form `<address>:<signature>`.
    #[error("malformed signature token: {0}")]
    MalformedToken(String),
    /// The signature bytes could not be parsed or recovered.
    #[error(transparent)]
    Signature(#[from] alloy::primitives::SignatureError),
    /// The signature recovers to a different address than the one claimed in
    /// the token.
    #[error("signature recovers to {recovered}, token claims {claimed}")]
    AddressMismatch {
        /// The address carried in the token.
        claimed: Address,
        /// The address recovered from the signature and request body.
        recovered: Address,
    },
}
