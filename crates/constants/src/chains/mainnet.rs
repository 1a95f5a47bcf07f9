//! Constants for Ethereum Mainnet.

/// Name for the chain.
pub const CHAIN_NAME: &str = "Mainnet";
/// Chain ID for Ethereum Mainnet. Dynamic-fee transactions observed on the
/// mainnet mempool are canonicalized with this id.
pub const CHAIN_ID: u64 = 1;

/// Blocknative auction relay endpoint.
pub const BLOCKNATIVE_AUCTION_URL: &str = "https://api.blocknative.com/v1/auction";
/// Flashbots relay endpoint.
pub const FLASHBOTS_RELAY_URL: &str = "https://relay.flashbots.net";
