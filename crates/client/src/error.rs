use crate::rpc::RpcError;
use relay_bundle::BundleError;
use relay_types::{ConfigError, SigningError};

/// Result type for [`RelayClient`] operations.
///
/// [`RelayClient`]: crate::RelayClient
pub type Result<T> = std::result::Result<T, RelayError>;

/// Errors returned by the [`RelayClient`].
///
/// [`RelayClient`]: crate::RelayClient
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    /// The request body could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),
    /// The request could not be serialized.
    #[error("failed to encode request: {0}")]
    Encoding(#[source] serde_json::Error),
    /// Bundles must contain at least one transaction.
    #[error("bundle must contain at least one transaction")]
    EmptyBundle,
    /// The request could not be delivered, or the response could not be
    /// read.
    #[error("error contacting relay: {0}")]
    Transport(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The response was not JSON of any recognized shape, or its result did
    /// not match the expected type.
    #[error("failed to decode relay response: {0}")]
    Decoding(#[source] serde_json::Error),
    /// The relay answered with a JSON-RPC error object.
    #[error(transparent)]
    Rpc(#[from] RpcError),
    /// The relay answered with a bare `{"error": "..."}` body.
    #[error("relay error: {0}")]
    Relay(String),
    /// Configuration could not be loaded from the environment.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),
    /// A header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl RelayError {
    /// Wrap a transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        RelayError::Transport(Box::new(err))
    }

    /// True if the relay itself rejected the request, as opposed to the
    /// request never arriving or the answer being unreadable.
    pub const fn is_relay_rejection(&self) -> bool {
        matches!(self, RelayError::Rpc(_) | RelayError::Relay(_))
    }
}

impl From<BundleError> for RelayError {
    fn from(err: BundleError) -> Self {
        match err {
            BundleError::EmptyBundle => RelayError::EmptyBundle,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::transport(err)
    }
}
