//! Relay SDK constants.
//!
//! This crate contains the constants shared across the relay SDK: the chain
//! ids transactions are canonicalized for, the known relay endpoints, the
//! JSON-RPC envelope conventions and the signature header compatibility
//! table.

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

mod chains;
pub use chains::mainnet;

mod types;
pub use types::{KnownRelays, ParseRelayError};

use std::time::Duration;

/// JSON-RPC protocol version sent in every request envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id used for every envelope. The client is single-shot and never
/// multiplexes requests over one connection.
pub const JSONRPC_REQUEST_ID: u64 = 1;

/// Bundle simulation method.
pub const CALL_BUNDLE_METHOD: &str = "eth_callBundle";

/// Header carrying the signature token on Blocknative-style auction relays.
pub const AUCTION_SIGNATURE_HEADER: &str = "X-Auction-Signature";

/// Header carrying the signature token on Flashbots-style relays.
pub const FLASHBOTS_SIGNATURE_HEADER: &str = "X-Flashbots-Signature";

/// Header names the signature token is sent under by default. Every name in
/// the table receives the identical token.
pub const SIGNATURE_HEADERS: &[&str] = &[AUCTION_SIGNATURE_HEADER, FLASHBOTS_SIGNATURE_HEADER];

/// Default timeout applied to the HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
