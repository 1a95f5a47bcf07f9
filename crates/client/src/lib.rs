//! Relay bundle client.
//!
//! Sends `eth_callBundle` requests to block builders and relays. Each request
//! body is serialized once, signed with the caller's key, and sent with the
//! resulting token in the relay's signature headers.
//!
//! ```no_run
//! # async fn example() -> Result<(), relay_client::RelayError> {
//! use alloy::signers::local::PrivateKeySigner;
//! use relay_bundle::CallBundle;
//! use relay_client::{RelayClient, RelayConfig};
//!
//! let signer = PrivateKeySigner::random();
//! let client = RelayClient::new(RelayConfig::from_env()?)?;
//!
//! let bundle = CallBundle::new(16_445_513).append_raw_tx(vec![0x02]);
//! let response = client.call_bundle(&signer, &bundle).await?;
//! println!("gas used: {}", response.total_gas_used);
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
pub use client::RelayClient;

mod config;
pub use config::{RelayConfig, RELAY_SIGNATURE_HEADERS, RELAY_TIMEOUT_SECS, RELAY_URL};

mod error;
pub use error::{RelayError, Result};

/// JSON-RPC request and response envelopes.
pub mod rpc;
pub use rpc::{decode_response, JsonRpcRequest, RpcError};

mod transport;
pub use transport::{HttpTransport, PreparedRequest, RelayResponse, RelayTransport};
