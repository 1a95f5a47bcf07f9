//! Mempool feed records and their canonicalization.
//!
//! Mempool streaming services deliver pending transactions as JSON records
//! with string-encoded fields: amounts in decimal, signature components and
//! calldata in hex. [`MempoolTransaction::canonicalize`] rebuilds the signed
//! transaction around the observed signature. The result must encode and
//! hash exactly like the transaction on chain, so every field is parsed under
//! its declared base and nothing is rounded or defaulted.

mod canonical;
pub use canonical::CanonicalTransaction;

mod error;
pub use error::CanonicalizeError;

mod parse;

use alloy::{
    consensus::{SignableTransaction, TxEip1559, TxLegacy},
    eips::eip2930::AccessList,
    primitives::{Signature, B256, U256},
};
use relay_constants::mainnet;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Type discriminator for legacy transactions.
pub const LEGACY_TX_TYPE: u64 = 0;

/// Type discriminator for dynamic-fee transactions.
pub const DYNAMIC_FEE_TX_TYPE: u64 = 2;

/// A pending transaction as delivered by a mempool feed.
///
/// Which fee fields are present depends on [`Self::ty`]: legacy records carry
/// `gasPrice`, dynamic-fee records carry `maxPriorityFeePerGas` and
/// `maxFeePerGas`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MempoolTransaction {
    /// Sender nonce.
    #[serde(default, with = "parse::number_or_string", skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    /// Gas limit.
    #[serde(default, with = "parse::number_or_string", skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    /// Gas price in wei, decimal. Legacy only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    /// Priority fee per gas in wei, decimal. Dynamic-fee only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<String>,
    /// Fee cap per gas in wei, decimal. Dynamic-fee only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<String>,
    /// Recipient. Absent for contract creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Value in wei, decimal.
    pub value: String,
    /// Calldata, hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Access list. Dynamic-fee only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_list: Option<AccessList>,
    /// Signature `v`, hex.
    pub v: String,
    /// Signature `r`, hex.
    pub r: String,
    /// Signature `s`, hex.
    pub s: String,
    /// Transaction type discriminator.
    #[serde(rename = "type", default)]
    pub ty: u64,
    /// Hash observed on the feed. Only used to cross-check the
    /// reconstruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Fields shared by every supported transaction type, already parsed.
struct CommonFields {
    nonce: u64,
    gas_limit: u64,
    to: alloy::primitives::TxKind,
    value: U256,
    input: alloy::primitives::Bytes,
    v: U256,
    r: U256,
    s: U256,
}

impl MempoolTransaction {
    /// Reconstruct the signed transaction for Ethereum Mainnet.
    pub fn canonicalize(&self) -> Result<CanonicalTransaction, CanonicalizeError> {
        self.canonicalize_with_chain_id(mainnet::CHAIN_ID)
    }

    /// Reconstruct the signed transaction. `chain_id` is bound into
    /// dynamic-fee transactions. Legacy transactions take their chain id from
    /// `v`.
    pub fn canonicalize_with_chain_id(
        &self,
        chain_id: u64,
    ) -> Result<CanonicalTransaction, CanonicalizeError> {
        let canonical = match self.ty {
            LEGACY_TX_TYPE => self.legacy()?,
            DYNAMIC_FEE_TX_TYPE => self.dynamic_fee(chain_id)?,
            other => return Err(CanonicalizeError::UnsupportedTransactionType(other)),
        };
        trace!(ty = self.ty, hash = %canonical.tx_hash(), "canonicalized mempool transaction");
        Ok(canonical)
    }

    /// Reconstruct the signed transaction for Ethereum Mainnet and check that
    /// it hashes to the hash observed on the feed.
    pub fn canonicalize_checked(&self) -> Result<CanonicalTransaction, CanonicalizeError> {
        let expected = self.observed_hash()?;
        let canonical = self.canonicalize()?;

        let computed = canonical.tx_hash();
        if computed != expected {
            warn!(%expected, %computed, "reconstructed transaction hash mismatch");
            return Err(CanonicalizeError::HashMismatch { expected, computed });
        }
        Ok(canonical)
    }

    /// The hash carried by the record.
    pub fn observed_hash(&self) -> Result<B256, CanonicalizeError> {
        let hash = self.hash.as_deref().ok_or(CanonicalizeError::MissingField("hash"))?;
        hash.parse().map_err(|e| CanonicalizeError::field("hash", hash, e))
    }

    fn common(&self) -> Result<CommonFields, CanonicalizeError> {
        let nonce = self.nonce.ok_or(CanonicalizeError::MissingField("nonce"))?;
        let gas = self.gas.ok_or(CanonicalizeError::MissingField("gas"))?;

        Ok(CommonFields {
            nonce: parse::narrow_u64("nonce", nonce)?,
            gas_limit: parse::narrow_u64("gas", gas)?,
            to: parse::recipient("to", self.to.as_deref())?,
            value: parse::decimal("value", &self.value)?,
            input: parse::hex_bytes("input", self.input.as_deref())?,
            v: parse::hex_quantity("v", &self.v)?,
            r: parse::hex_quantity("r", &self.r)?,
            s: parse::hex_quantity("s", &self.s)?,
        })
    }

    fn required_decimal_u128(
        field: &'static str,
        value: Option<&str>,
    ) -> Result<u128, CanonicalizeError> {
        let value = value.ok_or(CanonicalizeError::MissingField(field))?;
        parse::narrow_u128(field, parse::decimal(field, value)?)
    }

    fn legacy(&self) -> Result<CanonicalTransaction, CanonicalizeError> {
        let gas_price = Self::required_decimal_u128("gasPrice", self.gas_price.as_deref())?;
        let common = self.common()?;
        let (y_parity, chain_id) = legacy_v(&self.v, common.v)?;

        let tx = TxLegacy {
            chain_id,
            nonce: common.nonce,
            gas_price,
            gas_limit: common.gas_limit,
            to: common.to,
            value: common.value,
            input: common.input,
        };
        let signature = Signature::new(common.r, common.s, y_parity);
        Ok(CanonicalTransaction::Legacy(tx.into_signed(signature)))
    }

    fn dynamic_fee(&self, chain_id: u64) -> Result<CanonicalTransaction, CanonicalizeError> {
        let max_priority_fee_per_gas = Self::required_decimal_u128(
            "maxPriorityFeePerGas",
            self.max_priority_fee_per_gas.as_deref(),
        )?;
        let max_fee_per_gas =
            Self::required_decimal_u128("maxFeePerGas", self.max_fee_per_gas.as_deref())?;
        let common = self.common()?;

        let y_parity = match parse::narrow_u64("v", common.v)? {
            0 => false,
            1 => true,
            _ => return Err(CanonicalizeError::field("v", &self.v, "expected y-parity 0 or 1")),
        };

        let tx = TxEip1559 {
            chain_id,
            nonce: common.nonce,
            gas_limit: common.gas_limit,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            to: common.to,
            value: common.value,
            access_list: self.access_list.clone().unwrap_or_default(),
            input: common.input,
        };
        let signature = Signature::new(common.r, common.s, y_parity);
        Ok(CanonicalTransaction::DynamicFee(tx.into_signed(signature)))
    }
}

/// Split a legacy `v` into the y-parity and the [EIP-155] chain id, if any.
///
/// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
fn legacy_v(raw: &str, v: U256) -> Result<(bool, Option<u64>), CanonicalizeError> {
    match parse::narrow_u64("v", v)? {
        27 => Ok((false, None)),
        28 => Ok((true, None)),
        v if v >= 35 => Ok(((v - 35) % 2 == 1, Some((v - 35) / 2))),
        _ => Err(CanonicalizeError::field("v", raw, "expected 27, 28 or an EIP-155 value")),
    }
}

/// A mempool feed event. Only the transaction payload is modelled, all other
/// event metadata is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolEvent {
    /// The event body.
    pub event: MempoolEventBody,
}

/// Body of a [`MempoolEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolEventBody {
    /// The transaction the event refers to. Absent for non-transaction
    /// events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<MempoolTransaction>,
}

impl MempoolEvent {
    /// Decode an event from the raw feed payload.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// The transaction, if the event carries one with a nonce. Events for
    /// non-transaction activity come without one.
    pub fn transaction(&self) -> Option<&MempoolTransaction> {
        self.event.transaction.as_ref().filter(|tx| tx.nonce.is_some())
    }

    /// Consume the event, returning the transaction.
    pub fn into_transaction(self) -> Option<MempoolTransaction> {
        self.event.transaction.filter(|tx| tx.nonce.is_some())
    }
}
