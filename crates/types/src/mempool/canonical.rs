use alloy::{
    consensus::{Signed, TxEip1559, TxEnvelope, TxLegacy, TxType},
    eips::eip2718::Encodable2718,
    primitives::{Bytes, Signature, B256},
};

/// A transaction reconstructed from a mempool record, carrying exactly the
/// fields its type's encoding requires.
///
/// Only the transaction types observed on the feed are representable. The
/// value is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalTransaction {
    /// A legacy transaction with a single gas price.
    Legacy(Signed<TxLegacy>),
    /// An [EIP-1559] dynamic-fee transaction.
    ///
    /// [EIP-1559]: https://eips.ethereum.org/EIPS/eip-1559
    DynamicFee(Signed<TxEip1559>),
}

impl CanonicalTransaction {
    /// The [EIP-2718] transaction type.
    ///
    /// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::DynamicFee(_) => TxType::Eip1559,
        }
    }

    /// The transaction hash, `keccak256` of the EIP-2718 encoding.
    pub fn tx_hash(&self) -> B256 {
        match self {
            Self::Legacy(tx) => *tx.hash(),
            Self::DynamicFee(tx) => *tx.hash(),
        }
    }

    /// The signature carried over from the record.
    pub fn signature(&self) -> &Signature {
        match self {
            Self::Legacy(tx) => tx.signature(),
            Self::DynamicFee(tx) => tx.signature(),
        }
    }

    /// Convert into a [`TxEnvelope`] without consuming.
    pub fn envelope(&self) -> TxEnvelope {
        self.clone().into()
    }

    /// The EIP-2718 encoding, as accepted by `eth_sendRawTransaction` and
    /// bundle relays.
    pub fn encoded_2718(&self) -> Bytes {
        self.envelope().encoded_2718().into()
    }

    /// The EIP-2718 encoding as a `0x`-prefixed hex string.
    pub fn raw_hex(&self) -> String {
        hex::encode_prefixed(self.encoded_2718())
    }
}

impl From<CanonicalTransaction> for TxEnvelope {
    fn from(tx: CanonicalTransaction) -> Self {
        match tx {
            CanonicalTransaction::Legacy(tx) => TxEnvelope::Legacy(tx),
            CanonicalTransaction::DynamicFee(tx) => TxEnvelope::Eip1559(tx),
        }
    }
}

impl From<CanonicalTransaction> for Bytes {
    fn from(tx: CanonicalTransaction) -> Self {
        tx.encoded_2718()
    }
}
