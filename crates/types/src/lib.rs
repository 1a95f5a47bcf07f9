//! Relay SDK types.
//!
//! Contains the request [`signing`] scheme used to authenticate calls to
//! bundle relays, the [`mempool`] transaction record delivered by mempool
//! feeds together with its canonicalization into a signed transaction, and
//! environment [`config`] helpers.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod config;
pub use config::ConfigError;

pub mod mempool;
pub use mempool::{CanonicalTransaction, CanonicalizeError, MempoolEvent, MempoolTransaction};

pub mod signing;
pub use signing::{sign_request, verify_request, SignatureToken, SigningError};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
