//! Bundle simulation request.
use crate::serde_helpers::quantity;
use alloy::{
    eips::{eip2718::Encodable2718, BlockNumberOrTag},
    primitives::{keccak256, Bytes, B256},
};
use serde::{Deserialize, Serialize};

/// Errors in a [`CallBundle`] that make it unfit to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BundleError {
    /// Bundle is empty. Bundles must contain at least one transaction.
    #[error("bundle must contain at least one transaction")]
    EmptyBundle,
}

/// Bundle of transactions for `eth_callBundle`.
///
/// The relay simulates the transactions in order on top of the state at
/// [`Self::state_block_number`], as if they were included in
/// [`Self::block_number`]. This is the flashbots `eth_callBundle` bundle. See
/// [their docs].
///
/// [their docs]: https://docs.flashbots.net/flashbots-auction/advanced/rpc-endpoint#eth_callbundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallBundle {
    /// Signed, EIP-2718 encoded transactions, executed in order.
    pub txs: Vec<Bytes>,
    /// The block the bundle is simulated for.
    #[serde(with = "quantity")]
    pub block_number: u64,
    /// The block whose state the simulation starts from. Usually
    /// [`BlockNumberOrTag::Latest`].
    pub state_block_number: BlockNumberOrTag,
    /// Simulation timestamp, in seconds since the unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    /// Simulation timeout, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Block gas limit override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    /// Block difficulty override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u64>,
    /// Block base fee override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<u64>,
}

impl CallBundle {
    /// Creates an empty bundle targeting `block_number`, simulated on the
    /// latest state.
    pub fn new(block_number: u64) -> Self {
        Self { block_number, ..Default::default() }
    }

    /// Creates a new bundle from the given [`Encodable2718`] transactions.
    pub fn from_2718<I, T>(txs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Encodable2718,
    {
        Self::from_raw_txs(txs.into_iter().map(|tx| tx.encoded_2718()))
    }

    /// Creates a new bundle with the given raw transactions.
    pub fn from_raw_txs<I, T>(txs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Self { txs: txs.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    /// Returns the transactions in this bundle.
    pub fn txs(&self) -> &[Bytes] {
        &self.txs
    }

    /// Returns the block number for this bundle.
    pub const fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Returns the state block number for this bundle.
    pub const fn state_block_number(&self) -> BlockNumberOrTag {
        self.state_block_number
    }

    /// Returns the timestamp for this bundle.
    pub const fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Returns the simulation timeout for this bundle.
    pub const fn timeout(&self) -> Option<u64> {
        self.timeout
    }

    /// Returns the gas limit for this bundle.
    pub const fn gas_limit(&self) -> Option<u64> {
        self.gas_limit
    }

    /// Returns the difficulty for this bundle.
    pub const fn difficulty(&self) -> Option<u64> {
        self.difficulty
    }

    /// Returns the base fee for this bundle.
    pub const fn base_fee(&self) -> Option<u64> {
        self.base_fee
    }

    /// Adds an [`Encodable2718`] transaction to the bundle.
    pub fn append_2718_tx(self, tx: impl Encodable2718) -> Self {
        self.append_raw_tx(tx.encoded_2718())
    }

    /// Adds an EIP-2718 envelope to the bundle.
    pub fn append_raw_tx(mut self, tx: impl Into<Bytes>) -> Self {
        self.txs.push(tx.into());
        self
    }

    /// Adds multiple [`Encodable2718`] transactions to the bundle.
    pub fn extend_2718_txs<I, T>(self, tx: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Encodable2718,
    {
        self.extend_raw_txs(tx.into_iter().map(|tx| tx.encoded_2718()))
    }

    /// Adds multiple raw transactions to the bundle.
    pub fn extend_raw_txs<I, T>(mut self, txs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        self.txs.extend(txs.into_iter().map(Into::into));
        self
    }

    /// Sets the block number for the bundle.
    pub const fn with_block_number(mut self, block_number: u64) -> Self {
        self.block_number = block_number;
        self
    }

    /// Sets the state block number for the bundle.
    pub fn with_state_block_number(
        mut self,
        state_block_number: impl Into<BlockNumberOrTag>,
    ) -> Self {
        self.state_block_number = state_block_number.into();
        self
    }

    /// Sets the timestamp for the bundle.
    pub const fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the simulation timeout for the bundle.
    pub const fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the gas limit for the bundle.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Sets the difficulty for the bundle.
    pub const fn with_difficulty(mut self, difficulty: u64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Sets the base fee for the bundle.
    pub const fn with_base_fee(mut self, base_fee: u64) -> Self {
        self.base_fee = Some(base_fee);
        self
    }

    /// Check the bundle can be sent.
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.txs.is_empty() {
            return Err(BundleError::EmptyBundle);
        }
        Ok(())
    }

    /// Hashes of the transactions, in bundle order.
    pub fn tx_hashes(&self) -> impl Iterator<Item = B256> + '_ {
        self.txs.iter().map(keccak256)
    }

    /// The bundle hash relays report: `keccak256(tx_hash_1 ++ ... ++ tx_hash_n)`.
    pub fn bundle_hash(&self) -> B256 {
        let mut hasher = alloy::primitives::Keccak256::new();
        for hash in self.tx_hashes() {
            hasher.update(hash.as_slice());
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::bytes;

    #[test]
    fn wire_format() {
        let bundle = CallBundle::from_raw_txs([bytes!("f86c80")]).with_block_number(0xfaf049);

        assert_eq!(
            serde_json::to_string(&bundle).unwrap(),
            r#"{"txs":["0xf86c80"],"blockNumber":"0xfaf049","stateBlockNumber":"latest"}"#
        );
    }

    #[test]
    fn optional_fields_are_plain_numbers() {
        let bundle = CallBundle::new(16)
            .append_raw_tx(bytes!("02"))
            .with_state_block_number(15)
            .with_timestamp(1_700_000_000)
            .with_timeout(5_000)
            .with_gas_limit(30_000_000)
            .with_difficulty(0)
            .with_base_fee(7);

        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "txs": ["0x02"],
                "blockNumber": "0x10",
                "stateBlockNumber": "0xf",
                "timestamp": 1_700_000_000u64,
                "timeout": 5_000,
                "gasLimit": 30_000_000,
                "difficulty": 0,
                "baseFee": 7,
            })
        );

        let deserialized: CallBundle = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized, bundle);
    }

    #[test]
    fn empty_bundle_is_invalid() {
        assert_eq!(CallBundle::new(1).validate(), Err(BundleError::EmptyBundle));
        assert!(CallBundle::new(1).append_raw_tx(bytes!("00")).validate().is_ok());
    }

    #[test]
    fn bundle_hash_chains_tx_hashes() {
        let bundle = CallBundle::from_raw_txs([bytes!("01"), bytes!("02")]);

        let mut preimage = Vec::new();
        preimage.extend_from_slice(keccak256([0x01]).as_slice());
        preimage.extend_from_slice(keccak256([0x02]).as_slice());

        assert_eq!(bundle.bundle_hash(), keccak256(preimage));
        assert_eq!(bundle.tx_hashes().count(), 2);
    }
}
