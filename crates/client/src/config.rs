use crate::RelayError;
use relay_constants::{KnownRelays, DEFAULT_TIMEOUT, SIGNATURE_HEADERS};
use relay_types::config::{load_list_opt, load_string, load_u64_opt};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Url,
};
use std::time::Duration;

/// Relay endpoint. Either a URL or a known relay name such as `flashbots`.
pub const RELAY_URL: &str = "RELAY_URL";
/// Transport timeout, in whole seconds.
pub const RELAY_TIMEOUT_SECS: &str = "RELAY_TIMEOUT_SECS";
/// Comma-separated header names to send the signature token under.
pub const RELAY_SIGNATURE_HEADERS: &str = "RELAY_SIGNATURE_HEADERS";

/// Configuration for a [`RelayClient`].
///
/// [`RelayClient`]: crate::RelayClient
#[derive(Debug, Clone)]
pub struct RelayConfig {
    url: Url,
    timeout: Duration,
    signature_headers: Vec<String>,
    extra_headers: HeaderMap,
}

impl RelayConfig {
    /// Create a config for the relay at `url`, with the default timeout and
    /// signature headers.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: DEFAULT_TIMEOUT,
            signature_headers: SIGNATURE_HEADERS.iter().map(|h| h.to_string()).collect(),
            extra_headers: HeaderMap::new(),
        }
    }

    /// Create a config given a string URL.
    pub fn new_from_string(url: &str) -> Result<Self, RelayError> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Create a config for a known relay.
    pub fn for_relay(relay: KnownRelays) -> Result<Self, RelayError> {
        Self::new_from_string(relay.url())
    }

    /// Load the config from the environment.
    ///
    /// - `RELAY_URL` - required. A URL, or a known relay name.
    /// - `RELAY_TIMEOUT_SECS` - optional.
    /// - `RELAY_SIGNATURE_HEADERS` - optional, comma-separated.
    pub fn from_env() -> Result<Self, RelayError> {
        let url = load_string(RELAY_URL)?;
        let mut config = match url.parse::<KnownRelays>() {
            Ok(relay) => Self::for_relay(relay)?,
            Err(_) => Self::new_from_string(url.trim())?,
        };

        if let Some(secs) = load_u64_opt(RELAY_TIMEOUT_SECS)? {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(headers) = load_list_opt(RELAY_SIGNATURE_HEADERS) {
            config = config.with_signature_headers(headers)?;
        }
        Ok(config)
    }

    /// Set the transport timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the header names the signature token is sent under.
    pub fn with_signature_headers<I, S>(mut self, headers: I) -> Result<Self, RelayError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        for name in &headers {
            header_name(name)?;
        }
        self.signature_headers = headers;
        Ok(self)
    }

    /// Add a header sent with every request. Extra headers are applied last
    /// and replace any header of the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, RelayError> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| RelayError::InvalidHeader(format!("{name}: {e}")))?;
        self.extra_headers.insert(header_name(name)?, value);
        Ok(self)
    }

    /// Get the relay URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Get the transport timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the header names the signature token is sent under.
    pub fn signature_headers(&self) -> &[String] {
        &self.signature_headers
    }

    /// Get the extra headers.
    pub const fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// Build the header map for a request signed with `token`.
    ///
    /// JSON content headers first, then the token under every signature
    /// header name, then the extra headers.
    pub(crate) fn request_headers(&self, token: &str) -> Result<HeaderMap, RelayError> {
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("application/json"));

        let token = HeaderValue::from_str(token)
            .map_err(|e| RelayError::InvalidHeader(format!("signature token: {e}")))?;
        for name in &self.signature_headers {
            headers.insert(header_name(name)?, token.clone());
        }

        headers.extend(self.extra_headers.clone());
        Ok(headers)
    }
}

fn header_name(name: &str) -> Result<HeaderName, RelayError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| RelayError::InvalidHeader(format!("{name}: {e}")))
}
