use crate::RelayError;
use alloy::primitives::Bytes;
use relay_constants::{JSONRPC_REQUEST_ID, JSONRPC_VERSION};
use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 request.
///
/// Fields serialize in the order `id`, `jsonrpc`, `method`, `params`. Relays
/// expect `params` to be a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRpcRequest<'a, P> {
    id: u64,
    jsonrpc: &'static str,
    method: &'a str,
    params: P,
}

impl<'a, P: Serialize> JsonRpcRequest<'a, P> {
    /// Create a request for `method` with the given params.
    pub const fn new(method: &'a str, params: P) -> Self {
        Self { id: JSONRPC_REQUEST_ID, jsonrpc: JSONRPC_VERSION, method, params }
    }

    /// Get the method name.
    pub const fn method(&self) -> &str {
        self.method
    }

    /// Get the params.
    pub const fn params(&self) -> &P {
        &self.params
    }

    /// Serialize the request. These are the bytes that get signed and sent.
    pub fn to_body(&self) -> Result<Bytes, RelayError> {
        serde_json::to_vec(self).map(Bytes::from).map_err(RelayError::Encoding)
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("rpc error {code}: {message}")]
pub struct RpcError {
    /// Error code. Zero when the relay omits it.
    #[serde(default)]
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Additional error data, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JsonRpcResponse {
    /// Request id echoed by the server.
    pub id: Option<Value>,
    /// Protocol version.
    pub jsonrpc: Option<String>,
    /// The result, on success.
    pub result: Option<Value>,
    /// The error, on failure.
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    /// Split the envelope into its result or error.
    pub fn into_result(self) -> Result<Value, RelayError> {
        if let Some(error) = self.error {
            return Err(RelayError::Rpc(error));
        }
        self.result.ok_or_else(|| {
            RelayError::Decoding(serde_json::Error::custom("response has no result"))
        })
    }
}

/// The bare error body some relays send instead of a JSON-RPC envelope.
#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: String,
}

/// Decode a relay response body into the JSON-RPC `result`.
///
/// The body is first read as a JSON-RPC envelope. An `error` object there
/// becomes [`RelayError::Rpc`]. If the body is not an envelope, the relay
/// `{"error": "..."}` shape is tried and becomes [`RelayError::Relay`].
/// Anything else is [`RelayError::Decoding`].
pub fn decode_response(body: &[u8]) -> Result<Value, RelayError> {
    match serde_json::from_slice::<JsonRpcResponse>(body) {
        Ok(response) => response.into_result(),
        Err(err) => match serde_json::from_slice::<RelayErrorBody>(body) {
            Ok(relay) => Err(RelayError::Relay(relay.error)),
            Err(_) => Err(RelayError::Decoding(err)),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_field_order() {
        let body = JsonRpcRequest::new("eth_callBundle", [json!({"a": 1})]).to_body().unwrap();
        assert_eq!(
            &body[..],
            br#"{"id":1,"jsonrpc":"2.0","method":"eth_callBundle","params":[{"a":1}]}"#
        );
    }

    #[test]
    fn result() {
        let value = decode_response(br#"{"jsonrpc":"2.0","id":1,"result":{"totalGasUsed":1}}"#)
            .unwrap();
        assert_eq!(value, json!({"totalGasUsed": 1}));
    }

    #[test]
    fn rpc_error() {
        let err = decode_response(
            br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"nonce too low"}}"#,
        )
        .unwrap_err();
        match err {
            RelayError::Rpc(e) => {
                assert_eq!(e.code, -32000);
                assert_eq!(e.message, "nonce too low");
                assert!(e.data.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rpc_error_wins_over_result() {
        let err = decode_response(
            br#"{"jsonrpc":"2.0","id":1,"result":{},"error":{"code":1,"message":"m","data":"0x"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RelayError::Rpc(RpcError { code: 1, data: Some(_), .. })));
    }

    #[test]
    fn rpc_error_without_code() {
        let err = decode_response(br#"{"error":{"message":"bundle rejected"}}"#).unwrap_err();
        assert!(matches!(
            err,
            RelayError::Rpc(RpcError { code: 0, ref message, data: None })
                if message == "bundle rejected"
        ));
    }

    #[test]
    fn relay_error_string() {
        let err = decode_response(br#"{"error":"block in the past"}"#).unwrap_err();
        assert!(matches!(err, RelayError::Relay(msg) if msg == "block in the past"));
    }

    #[test]
    fn not_json() {
        assert!(matches!(decode_response(b"bad gateway"), Err(RelayError::Decoding(_))));
        assert!(matches!(decode_response(b""), Err(RelayError::Decoding(_))));
        assert!(matches!(decode_response(b"[1,2]"), Err(RelayError::Decoding(_))));
    }

    #[test]
    fn missing_result() {
        assert!(matches!(
            decode_response(br#"{"jsonrpc":"2.0","id":1}"#),
            Err(RelayError::Decoding(_))
        ));
    }
}
