use alloy::primitives::B256;

/// Errors produced while reconstructing a transaction from a
/// [`MempoolTransaction`] record.
///
/// [`MempoolTransaction`]: crate::MempoolTransaction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonicalizeError {
    /// The record's type discriminator is not a supported transaction type.
    #[error("unsupported transaction type {0}")]
    UnsupportedTransactionType(u64),
    /// A field required by the record's transaction type is absent.
    #[error("missing field {0}")]
    MissingField(&'static str),
    /// A field failed to parse under its declared encoding.
    #[error("failed to parse field {field} from {value:?}: {reason}")]
    FieldParse {
        /// Name of the field, as it appears on the wire.
        field: &'static str,
        /// The raw value.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
    /// The reconstructed transaction does not hash to the hash observed on
    /// the feed.
    #[error("reconstructed hash {computed} does not match observed hash {expected}")]
    HashMismatch {
        /// Hash carried by the record.
        expected: B256,
        /// Hash of the reconstructed transaction.
        computed: B256,
    },
}

impl CanonicalizeError {
    /// Instantiate a new [`CanonicalizeError::FieldParse`].
    pub fn field(field: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::FieldParse { field, value: value.to_string(), reason: reason.to_string() }
    }
}
