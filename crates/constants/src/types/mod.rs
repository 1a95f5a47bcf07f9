mod relays;
pub use relays::{KnownRelays, ParseRelayError};
