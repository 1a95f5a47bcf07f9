use crate::{mainnet, AUCTION_SIGNATURE_HEADER, FLASHBOTS_SIGNATURE_HEADER};
use std::str::FromStr;

/// The list of known relays as a string.
const KNOWN_RELAYS: &str = "blocknative, flashbots";

/// Error type for parsing a relay from its name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRelayError {
    /// The relay name is not supported.
    #[error("relay name {0} is not parseable. supported relays: {KNOWN_RELAYS}")]
    RelayNotSupported(String),
}

/// Known bundle relays on Ethereum Mainnet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KnownRelays {
    /// Blocknative auction relay.
    Blocknative,
    /// Flashbots relay.
    Flashbots,
}

impl KnownRelays {
    /// The relay's JSON-RPC endpoint.
    pub const fn url(&self) -> &'static str {
        match self {
            Self::Blocknative => mainnet::BLOCKNATIVE_AUCTION_URL,
            Self::Flashbots => mainnet::FLASHBOTS_RELAY_URL,
        }
    }

    /// The header the relay reads the signature token from.
    pub const fn signature_header(&self) -> &'static str {
        match self {
            Self::Blocknative => AUCTION_SIGNATURE_HEADER,
            Self::Flashbots => FLASHBOTS_SIGNATURE_HEADER,
        }
    }
}

impl FromStr for KnownRelays {
    type Err = ParseRelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "blocknative" => Ok(Self::Blocknative),
            "flashbots" => Ok(Self::Flashbots),
            _ => Err(ParseRelayError::RelayNotSupported(s)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_known_relays() {
        assert_eq!(" Flashbots ".parse::<KnownRelays>().unwrap(), KnownRelays::Flashbots);
        assert_eq!("blocknative".parse::<KnownRelays>().unwrap(), KnownRelays::Blocknative);
        assert_eq!(
            "eden".parse::<KnownRelays>(),
            Err(ParseRelayError::RelayNotSupported("eden".to_string()))
        );
    }

    #[test]
    fn relays_use_their_own_header() {
        assert_eq!(KnownRelays::Blocknative.signature_header(), "X-Auction-Signature");
        assert_eq!(KnownRelays::Flashbots.signature_header(), "X-Flashbots-Signature");
    }
}
