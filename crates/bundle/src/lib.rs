//! Relay Bundle Library
//!
//! Contains the [`CallBundle`] request sent to `eth_callBundle` and the
//! [`CallBundleResponse`] simulation result returned by relays.

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

mod call;
pub use call::{BundleError, CallBundle};

mod response;
pub use response::{CallBundleResponse, CallBundleTxResult};

mod serde_helpers;
