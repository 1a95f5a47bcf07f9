/// Mainnet chain constants.
pub mod mainnet;
