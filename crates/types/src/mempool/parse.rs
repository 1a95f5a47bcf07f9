//! Field parsing for mempool records. Every helper names the field it parses
//! so failures point at the offending value.

use super::CanonicalizeError;
use alloy::primitives::{Address, Bytes, TxKind, U256};

fn strip_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value)
}

/// Parse a base-10 integer.
pub(crate) fn decimal(field: &'static str, value: &str) -> Result<U256, CanonicalizeError> {
    if value.is_empty() {
        return Err(CanonicalizeError::field(field, value, "empty string"));
    }
    U256::from_str_radix(value, 10).map_err(|e| CanonicalizeError::field(field, value, e))
}

/// Parse a base-16 integer, with or without a `0x` prefix.
pub(crate) fn hex_quantity(field: &'static str, value: &str) -> Result<U256, CanonicalizeError> {
    let digits = strip_hex_prefix(value);
    if digits.is_empty() {
        return Err(CanonicalizeError::field(field, value, "no hex digits"));
    }
    U256::from_str_radix(digits, 16).map_err(|e| CanonicalizeError::field(field, value, e))
}

/// Decode hex calldata. An absent or empty value is empty calldata.
pub(crate) fn hex_bytes(
    field: &'static str,
    value: Option<&str>,
) -> Result<Bytes, CanonicalizeError> {
    match value {
        None => Ok(Bytes::new()),
        Some(value) => hex::decode(strip_hex_prefix(value))
            .map(Into::into)
            .map_err(|e| CanonicalizeError::field(field, value, e)),
    }
}

/// Parse the recipient. An absent or empty recipient is a contract creation.
pub(crate) fn recipient(
    field: &'static str,
    value: Option<&str>,
) -> Result<TxKind, CanonicalizeError> {
    match value.map(str::trim) {
        None | Some("") => Ok(TxKind::Create),
        Some(value) => value
            .parse::<Address>()
            .map(TxKind::Call)
            .map_err(|e| CanonicalizeError::field(field, value, e)),
    }
}

/// Narrow to a u64, rejecting values that do not fit.
pub(crate) fn narrow_u64(field: &'static str, value: U256) -> Result<u64, CanonicalizeError> {
    if value > U256::from(u64::MAX) {
        return Err(CanonicalizeError::field(field, &value.to_string(), "overflows u64"));
    }
    Ok(value.to::<u64>())
}

/// Narrow to a u128, rejecting values that do not fit.
pub(crate) fn narrow_u128(field: &'static str, value: U256) -> Result<u128, CanonicalizeError> {
    if value > U256::from(u128::MAX) {
        return Err(CanonicalizeError::field(field, &value.to_string(), "overflows u128"));
    }
    Ok(value.to::<u128>())
}

/// Serde support for optional integers that feeds deliver either as JSON
/// numbers or as decimal / `0x`-hex strings.
pub(crate) mod number_or_string {
    use alloy::primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    pub(crate) fn serialize<S: Serializer>(
        value: &Option<U256>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) if *value <= U256::from(u64::MAX) => {
                value.to::<u64>().serialize(serializer)
            }
            Some(value) => value.to_string().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        Option::<NumberOrString>::deserialize(deserializer)?
            .map(|value| match value {
                NumberOrString::Number(n) => Ok(U256::from(n)),
                NumberOrString::String(s) => s.trim().parse::<U256>().map_err(D::Error::custom),
            })
            .transpose()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decimal_rejects_hex_and_empty() {
        assert_eq!(decimal("value", "1000").unwrap(), U256::from(1000));
        assert!(decimal("value", "0x10").is_err());
        assert!(decimal("value", "").is_err());
        assert!(decimal("value", "-1").is_err());
    }

    #[test]
    fn hex_quantity_prefix_is_optional() {
        assert_eq!(hex_quantity("v", "0x25").unwrap(), U256::from(37));
        assert_eq!(hex_quantity("v", "25").unwrap(), U256::from(37));
        assert!(matches!(
            hex_quantity("r", "0x"),
            Err(CanonicalizeError::FieldParse { field: "r", .. })
        ));
        assert!(hex_quantity("s", "0xzz").is_err());
    }

    #[test]
    fn calldata() {
        assert!(hex_bytes("input", None).unwrap().is_empty());
        assert!(hex_bytes("input", Some("0x")).unwrap().is_empty());
        assert_eq!(
            hex_bytes("input", Some("0xa9059cbb")).unwrap(),
            Bytes::from_static(&[0xa9, 0x05, 0x9c, 0xbb])
        );
        assert!(hex_bytes("input", Some("0xabc")).is_err());
    }

    #[test]
    fn recipients() {
        assert_eq!(recipient("to", None).unwrap(), TxKind::Create);
        assert_eq!(recipient("to", Some("")).unwrap(), TxKind::Create);
        assert_eq!(
            recipient("to", Some("0xdAC17F958D2ee523a2206206994597C13D831ec7")).unwrap(),
            TxKind::Call(alloy::primitives::address!("0xdAC17F958D2ee523a2206206994597C13D831ec7"))
        );
        assert!(recipient("to", Some("0x1234")).is_err());
    }

    #[test]
    fn narrowing_overflow_is_an_error() {
        assert_eq!(narrow_u64("nonce", U256::from(u64::MAX)).unwrap(), u64::MAX);
        assert!(narrow_u64("nonce", U256::from(u64::MAX) + U256::from(1)).is_err());
        assert!(narrow_u128("gasPrice", U256::MAX).is_err());
    }
}
