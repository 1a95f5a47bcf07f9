use alloy::primitives::Bytes;
use core::future::Future;
use relay_types::SignatureToken;
use reqwest::{header::HeaderMap, StatusCode, Url};
use std::time::Duration;

/// A signed request, ready to send.
///
/// Holds the exact body bytes that were signed, the token, and the full
/// header set. Returned by [`RelayClient::prepare`] so callers can inspect
/// what is sent.
///
/// [`RelayClient::prepare`]: crate::RelayClient::prepare
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: String,
    body: Bytes,
    token: SignatureToken,
    headers: HeaderMap,
}

impl PreparedRequest {
    /// Create a new prepared request.
    pub const fn new(
        method: String,
        body: Bytes,
        token: SignatureToken,
        headers: HeaderMap,
    ) -> Self {
        Self { method, body, token, headers }
    }

    /// The JSON-RPC method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The serialized request body.
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// The signature token over [`Self::body`].
    pub const fn token(&self) -> &SignatureToken {
        &self.token
    }

    /// The headers sent with the request.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Split into the body and headers.
    pub fn into_parts(self) -> (Bytes, HeaderMap) {
        (self.body, self.headers)
    }
}

/// A raw relay response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    status: StatusCode,
    body: Bytes,
}

impl RelayResponse {
    /// Create a new response.
    pub const fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    /// HTTP status of the response.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body.
    pub const fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Delivers prepared requests to a relay.
///
/// Implementors only move bytes. Decoding and error classification happen
/// in the [`RelayClient`]. A non-2xx status is not an error at this layer,
/// since relays put JSON-RPC errors in error responses.
///
/// [`RelayClient`]: crate::RelayClient
pub trait RelayTransport {
    /// The error type returned when a request cannot be delivered.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Send a request and return the raw response.
    fn send(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<RelayResponse, Self::Error>> + Send;
}

/// HTTP transport. POSTs requests to a fixed relay URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The relay endpoint.
    url: Url,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new transport with the given URL and client.
    pub const fn new_with_client(url: Url, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Create a new transport whose requests time out after `timeout`.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new_with_client(url, client))
    }

    /// Get the relay URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl RelayTransport for HttpTransport {
    type Error = reqwest::Error;

    async fn send(&self, request: PreparedRequest) -> Result<RelayResponse, Self::Error> {
        let (body, headers) = request.into_parts();
        let response =
            self.client.post(self.url.clone()).headers(headers).body(body.to_vec()).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(RelayResponse::new(status, body.into()))
    }
}
