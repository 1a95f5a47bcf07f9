//! Serde helpers for the relay wire formats.

/// `u64` as a `0x`-prefixed hex quantity.
pub(crate) mod quantity {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{value:x}"))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| D::Error::custom(format!("quantity {s:?} is missing 0x prefix")))?;
        u64::from_str_radix(digits, 16).map_err(D::Error::custom)
    }
}

/// Wei amounts, which relays report as decimal strings. Hex strings and JSON
/// numbers are accepted on input. Output is always a decimal string.
pub(crate) mod wei {
    use alloy::primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    pub(crate) fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<U256, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(U256::from(n)),
            NumberOrString::String(s) if s.trim().is_empty() => Ok(U256::ZERO),
            NumberOrString::String(s) => s.trim().parse().map_err(D::Error::custom),
        }
    }
}

/// Counters such as gas used and block numbers. Relays send JSON numbers, some
/// send hex or decimal strings. Output is always a JSON number.
pub(crate) mod number {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    pub(crate) fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => match s.trim().strip_prefix("0x") {
                Some(digits) => u64::from_str_radix(digits, 16).map_err(D::Error::custom),
                None => s.trim().parse().map_err(D::Error::custom),
            },
        }
    }
}

/// Optional strings where relays send `""` for "none".
pub(crate) mod non_empty {
    use serde::{Deserialize, Deserializer};

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
    }
}
