use crate::{
    rpc::{decode_response, JsonRpcRequest},
    HttpTransport, PreparedRequest, RelayConfig, RelayError, RelayTransport,
};
use alloy::signers::Signer;
use relay_bundle::{CallBundle, CallBundleResponse};
use relay_constants::{KnownRelays, CALL_BUNDLE_METHOD};
use relay_types::sign_request;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Authenticated JSON-RPC client for a bundle relay.
///
/// Every request is serialized once, signed with the caller's [`Signer`],
/// and sent with the token in each configured signature header. The client
/// keeps no per-request state, so one instance can be shared between tasks.
#[derive(Debug, Clone)]
pub struct RelayClient<T = HttpTransport> {
    config: RelayConfig,
    transport: T,
}

impl RelayClient<HttpTransport> {
    /// Create a client sending over HTTP, with the configured timeout.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let transport = HttpTransport::new(config.url().clone(), config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from the environment. See [`RelayConfig::from_env`].
    pub fn from_env() -> Result<Self, RelayError> {
        Self::new(RelayConfig::from_env()?)
    }

    /// Connect to a known relay.
    pub fn for_relay(relay: KnownRelays) -> Result<Self, RelayError> {
        Self::new(RelayConfig::for_relay(relay)?)
    }
}

impl<T> RelayClient<T> {
    /// Create a client with a custom transport.
    pub const fn with_transport(config: RelayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Get the config.
    pub const fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Get the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: RelayTransport> RelayClient<T> {
    /// Serialize and sign a request without sending it.
    #[instrument(skip_all, fields(method = method))]
    pub async fn prepare<S, P>(
        &self,
        signer: &S,
        method: &str,
        params: P,
    ) -> Result<PreparedRequest, RelayError>
    where
        S: Signer + Sync + ?Sized,
        P: Serialize,
    {
        let body = JsonRpcRequest::new(method, params).to_body()?;
        let token = sign_request(&body, signer).await?;
        let headers = self.config.request_headers(&token.to_string())?;

        debug!(signer = %token.address(), method, body_len = body.len(), "signed relay request");
        Ok(PreparedRequest::new(method.to_owned(), body, token, headers))
    }

    /// Send a prepared request and decode the JSON-RPC result.
    #[instrument(skip_all)]
    pub async fn send_prepared(&self, request: PreparedRequest) -> Result<Value, RelayError> {
        let method = request.method().to_owned();
        let response = self
            .transport
            .send(request)
            .await
            .map_err(RelayError::transport)
            .inspect_err(|e| warn!(%e, %method, "Failed to reach relay"))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, %method, body_len = response.body().len(), "relay responded");
        } else {
            warn!(%status, %method, "relay returned non-success status");
        }

        decode_response(response.body())
            .inspect_err(|e| warn!(%e, %status, %method, "relay request failed"))
    }

    /// Sign, send and decode a request in one call.
    pub async fn request<S, P>(
        &self,
        signer: &S,
        method: &str,
        params: P,
    ) -> Result<Value, RelayError>
    where
        S: Signer + Sync + ?Sized,
        P: Serialize,
    {
        let request = self.prepare(signer, method, params).await?;
        self.send_prepared(request).await
    }

    /// Simulate a bundle with `eth_callBundle`.
    ///
    /// Empty bundles are rejected before anything is signed or sent.
    #[instrument(skip_all, fields(block_number = bundle.block_number(), txs = bundle.txs().len()))]
    pub async fn call_bundle<S>(
        &self,
        signer: &S,
        bundle: &CallBundle,
    ) -> Result<CallBundleResponse, RelayError>
    where
        S: Signer + Sync + ?Sized,
    {
        bundle.validate()?;

        let result = self.request(signer, CALL_BUNDLE_METHOD, [bundle]).await?;
        serde_json::from_value::<CallBundleResponse>(result)
            .map_err(RelayError::Decoding)
            .inspect_err(|e| warn!(%e, "Failed to parse bundle simulation result"))
    }
}
