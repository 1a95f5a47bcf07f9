//! Bundle simulation results.
use crate::serde_helpers::{non_empty, number, wei};
use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Result of an `eth_callBundle` simulation.
///
/// Every field is optional on the wire. Relays differ in what they report,
/// and missing fields decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallBundleResponse {
    /// Effective gas price of the bundle, in wei.
    #[serde(with = "wei")]
    pub bundle_gas_price: U256,
    /// Hash of the bundle, as computed by the relay.
    pub bundle_hash: B256,
    /// Total change in the coinbase balance, in wei.
    #[serde(with = "wei")]
    pub coinbase_diff: U256,
    /// Direct payments to the coinbase, in wei.
    #[serde(with = "wei")]
    pub eth_sent_to_coinbase: U256,
    /// Total gas fees paid, in wei.
    #[serde(with = "wei")]
    pub gas_fees: U256,
    /// Per transaction results, in bundle order.
    pub results: Vec<CallBundleTxResult>,
    /// The block whose state the simulation ran on.
    #[serde(with = "number")]
    pub state_block_number: u64,
    /// Gas used by the whole bundle.
    #[serde(with = "number")]
    pub total_gas_used: u64,
}

impl CallBundleResponse {
    /// True if no transaction in the bundle errored or reverted.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(CallBundleTxResult::is_success)
    }

    /// Results of transactions that errored or reverted.
    pub fn failed_results(&self) -> impl Iterator<Item = &CallBundleTxResult> + '_ {
        self.results.iter().filter(|result| !result.is_success())
    }

    /// Look up the result for a transaction by hash.
    pub fn result_for(&self, tx_hash: B256) -> Option<&CallBundleTxResult> {
        self.results.iter().find(|result| result.tx_hash == tx_hash)
    }
}

/// Simulation result of a single bundle transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallBundleTxResult {
    /// Change in the coinbase balance caused by this transaction, in wei.
    #[serde(with = "wei")]
    pub coinbase_diff: U256,
    /// Direct payment to the coinbase, in wei.
    #[serde(with = "wei")]
    pub eth_sent_to_coinbase: U256,
    /// Transaction sender.
    pub from_address: Address,
    /// Gas fees paid, in wei.
    #[serde(with = "wei")]
    pub gas_fees: U256,
    /// Effective gas price, in wei.
    #[serde(with = "wei")]
    pub gas_price: U256,
    /// Gas used by the transaction.
    #[serde(with = "number")]
    pub gas_used: u64,
    /// Recipient. `None` for contract creation.
    pub to_address: Option<Address>,
    /// Transaction hash.
    pub tx_hash: B256,
    /// Return data of the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Bytes>,
    /// Execution error, if the transaction failed.
    #[serde(deserialize_with = "non_empty::deserialize", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Revert reason, if the transaction reverted.
    #[serde(deserialize_with = "non_empty::deserialize", skip_serializing_if = "Option::is_none")]
    pub revert: Option<String>,
}

impl CallBundleTxResult {
    /// True if the transaction neither errored nor reverted.
    pub const fn is_success(&self) -> bool {
        self.error.is_none() && self.revert.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::{address, b256};

    const RELAY_RESPONSE: &str = r#"{
        "bundleGasPrice": "476190476193",
        "bundleHash": "0x73b1e258c7a42fd0230b2fd05529c5d4b6fcb66c227783f8bece8aeacdd1db2e",
        "coinbaseDiff": "20000000000126000",
        "ethSentToCoinbase": "20000000000000000",
        "gasFees": "126000",
        "results": [
            {
                "coinbaseDiff": "10000000000063000",
                "ethSentToCoinbase": "10000000000000000",
                "fromAddress": "0x02a727155aef8609c9396f4d3e6d6a8a0b7b0d0c",
                "gasFees": "63000",
                "gasPrice": "476190476193",
                "gasUsed": 21000,
                "toAddress": "0x73625f59cadc5009cb458b751b3e7b6b48c06f2c",
                "txHash": "0x669b4704a7d993a946cdd6e2f95233f308ce0c4649d2e04944e8299efcaa098a",
                "value": "0x"
            },
            {
                "coinbaseDiff": "10000000000063000",
                "ethSentToCoinbase": "10000000000000000",
                "fromAddress": "0x02a727155aef8609c9396f4d3e6d6a8a0b7b0d0c",
                "gasFees": "63000",
                "gasPrice": "476190476193",
                "gasUsed": 21000,
                "toAddress": "0x73625f59cadc5009cb458b751b3e7b6b48c06f2c",
                "txHash": "0xa839ee83465657cac01adc1d50d96c1b586ed498120a84a64749c0034b4f19fa",
                "value": "0x",
                "revert": "out of funds"
            }
        ],
        "stateBlockNumber": 5221585,
        "totalGasUsed": 42000
    }"#;

    #[test]
    fn decode_relay_response() {
        let resp: CallBundleResponse = serde_json::from_str(RELAY_RESPONSE).unwrap();

        assert_eq!(resp.bundle_gas_price, U256::from(476190476193u64));
        assert_eq!(resp.coinbase_diff, U256::from(20000000000126000u64));
        assert_eq!(resp.gas_fees, U256::from(126000));
        assert_eq!(resp.state_block_number, 5221585);
        assert_eq!(resp.total_gas_used, 42000);
        assert_eq!(resp.results.len(), 2);

        let first = &resp.results[0];
        assert_eq!(first.from_address, address!("0x02a727155aef8609c9396f4d3e6d6a8a0b7b0d0c"));
        assert_eq!(first.to_address, Some(address!("0x73625f59cadc5009cb458b751b3e7b6b48c06f2c")));
        assert_eq!(first.gas_used, 21000);
        assert_eq!(first.value, Some(Bytes::new()));
        assert!(first.is_success());

        assert!(!resp.is_success());
        let failed: Vec<_> = resp.failed_results().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].revert.as_deref(), Some("out of funds"));

        let hash = b256!("0xa839ee83465657cac01adc1d50d96c1b586ed498120a84a64749c0034b4f19fa");
        assert_eq!(resp.result_for(hash), Some(failed[0]));
    }

    #[test]
    fn partial_response_uses_defaults() {
        let resp: CallBundleResponse = serde_json::from_str(r#"{"totalGasUsed":63197}"#).unwrap();

        assert_eq!(resp.total_gas_used, 63197);
        assert_eq!(resp.bundle_hash, B256::ZERO);
        assert!(resp.results.is_empty());
        assert!(resp.is_success());
    }

    #[test]
    fn empty_error_strings_are_success() {
        let resp: CallBundleResponse = serde_json::from_str(
            r#"{"results":[{"error":"","revert":"","value":"0x"},{"error":"out of gas","revert":""}]}"#,
        )
        .unwrap();

        assert!(resp.results[0].is_success());
        assert_eq!(resp.results[0].error, None);
        assert_eq!(resp.results[0].revert, None);

        let failed: Vec<_> = resp.failed_results().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].error.as_deref(), Some("out of gas"));
        assert_eq!(failed[0].revert, None);
    }

    #[test]
    fn lenient_numbers() {
        let resp: CallBundleResponse = serde_json::from_str(
            r#"{"stateBlockNumber":"0xfaf049","totalGasUsed":"21000","gasFees":"0x10","coinbaseDiff":""}"#,
        )
        .unwrap();

        assert_eq!(resp.state_block_number, 0xfaf049);
        assert_eq!(resp.total_gas_used, 21000);
        assert_eq!(resp.gas_fees, U256::from(16));
        assert_eq!(resp.coinbase_diff, U256::ZERO);
    }

    #[test]
    fn wei_amounts_serialize_as_decimal() {
        let resp = CallBundleResponse {
            gas_fees: U256::from(126000),
            total_gas_used: 42000,
            ..Default::default()
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["gasFees"], "126000");
        assert_eq!(value["totalGasUsed"], 42000);
    }
}
