//! Relay request signing.
//!
//! Relays authenticate a request by the signature over its exact body bytes.
//! The body is hashed with keccak256, the hash is rendered as a `0x`-prefixed
//! hex string, and that string is signed as an [EIP-191] personal message.
//! The resulting [`SignatureToken`] is sent as `<address>:<signature>`.
//!
//! [EIP-191]: https://eips.ethereum.org/EIPS/eip-191

mod error;
pub use error::SigningError;

use alloy::{
    primitives::{keccak256, Address, Signature},
    signers::Signer,
};
use std::{fmt, str::FromStr};

/// The address and signature authenticating a relay request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureToken {
    address: Address,
    signature: Signature,
}

impl SignatureToken {
    /// Create a new token.
    pub const fn new(address: Address, signature: Signature) -> Self {
        Self { address, signature }
    }

    /// The address of the signer.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The signature over the request digest.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl SignatureToken {
    /// The signature as `r || s || y_parity`, with the recovery byte as 0 or
    /// 1.
    pub fn signature_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&self.signature.r().to_be_bytes::<32>());
        bytes[32..64].copy_from_slice(&self.signature.s().to_be_bytes::<32>());
        bytes[64] = self.signature.v() as u8;
        bytes
    }
}

impl fmt::Display for SignatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.address.to_checksum(None),
            hex::encode_prefixed(self.signature_bytes())
        )
    }
}

impl FromStr for SignatureToken {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, signature) = s
            .split_once(':')
            .ok_or_else(|| SigningError::MalformedToken("missing ':' separator".to_string()))?;

        let address = address
            .parse::<Address>()
            .map_err(|e| SigningError::MalformedToken(format!("bad address: {e}")))?;
        let bytes = hex::decode(signature)
            .map_err(|e| SigningError::MalformedToken(format!("bad signature hex: {e}")))?;
        let signature = Signature::try_from(bytes.as_slice())?;

        Ok(Self { address, signature })
    }
}

/// The message actually signed for a request body: the lowercase,
/// `0x`-prefixed hex rendering of `keccak256(body)`.
pub fn request_digest(body: &[u8]) -> String {
    hex::encode_prefixed(keccak256(body))
}

/// Sign a serialized request body.
///
/// The token must be computed over the identical bytes that are sent. Any
/// re-serialization between signing and sending invalidates it.
pub async fn sign_request<S>(body: &[u8], signer: &S) -> Result<SignatureToken, SigningError>
where
    S: Signer + Sync + ?Sized,
{
    let digest = request_digest(body);
    let signature = signer.sign_message(digest.as_bytes()).await?;
    Ok(SignatureToken::new(signer.address(), signature))
}

/// Check that `token` was produced by signing exactly `body`, returning the
/// authenticated address.
pub fn verify_request(body: &[u8], token: &SignatureToken) -> Result<Address, SigningError> {
    let recovered = token.signature.recover_address_from_msg(request_digest(body).as_bytes())?;
    if recovered != token.address {
        return Err(SigningError::AddressMismatch { claimed: token.address, recovered });
    }
    Ok(recovered)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{TEST_SIGNERS, TEST_USERS};

    const BODY: &[u8] = br#"{"id":1,"jsonrpc":"2.0","method":"eth_callBundle","params":[]}"#;

    #[test]
    fn digest_is_prefixed_lowercase_hex() {
        let digest = request_digest(b"");
        assert_eq!(
            digest,
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[tokio::test]
    async fn signing_is_deterministic() {
        let signer = &TEST_SIGNERS[0];
        let a = sign_request(BODY, signer).await.unwrap();
        let b = sign_request(BODY, signer).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());

        let other = sign_request(b"{}", signer).await.unwrap();
        assert_ne!(a.to_string(), other.to_string());
    }

    #[tokio::test]
    async fn token_format() {
        let token = sign_request(BODY, &TEST_SIGNERS[1]).await.unwrap();
        let rendered = token.to_string();
        let (address, signature) = rendered.split_once(':').unwrap();

        assert_eq!(address, TEST_USERS[1].to_checksum(None));
        assert!(signature.starts_with("0x"));
        // r || s || v
        assert_eq!(signature.len(), 2 + 65 * 2);

        let parsed: SignatureToken = rendered.parse().unwrap();
        assert_eq!(parsed, token);
    }

    #[tokio::test]
    async fn recovery_byte_is_parity() {
        for signer in TEST_SIGNERS.iter() {
            let token = sign_request(b"{}", signer).await.unwrap();
            let bytes = token.signature_bytes();
            assert_eq!(bytes[64], token.signature().v() as u8);

            let rendered = token.to_string();
            assert!(rendered.ends_with("00") || rendered.ends_with("01"));
            assert_eq!(rendered[rendered.len() - 2..], format!("{:02x}", bytes[64]));
        }
    }

    #[tokio::test]
    async fn parses_either_recovery_byte() {
        let token = sign_request(BODY, &TEST_SIGNERS[0]).await.unwrap();
        let address = token.address().to_checksum(None);

        let mut legacy = token.signature_bytes();
        legacy[64] += 27;
        let parsed: SignatureToken =
            format!("{address}:{}", hex::encode_prefixed(legacy)).parse().unwrap();
        assert_eq!(parsed, token);
        assert_eq!(verify_request(BODY, &parsed).unwrap(), TEST_USERS[0]);
    }

    #[tokio::test]
    async fn verifies_signed_body() {
        let token = sign_request(BODY, &TEST_SIGNERS[0]).await.unwrap();
        assert_eq!(verify_request(BODY, &token).unwrap(), TEST_USERS[0]);
    }

    #[tokio::test]
    async fn mutated_body_fails_verification() {
        let token = sign_request(BODY, &TEST_SIGNERS[0]).await.unwrap();

        let mut mutated = BODY.to_vec();
        mutated.push(b' ');
        assert!(verify_request(&mutated, &token).is_err());
    }

    #[tokio::test]
    async fn claimed_address_must_match() {
        let token = sign_request(BODY, &TEST_SIGNERS[0]).await.unwrap();
        let forged = SignatureToken::new(TEST_USERS[2], *token.signature());

        assert!(matches!(
            verify_request(BODY, &forged),
            Err(SigningError::AddressMismatch { claimed, recovered })
                if claimed == TEST_USERS[2] && recovered == TEST_USERS[0]
        ));
    }

    #[test]
    fn malformed_tokens() {
        assert!(matches!(
            "0xdeadbeef".parse::<SignatureToken>(),
            Err(SigningError::MalformedToken(_))
        ));
        assert!(matches!(
            "nope:0x00".parse::<SignatureToken>(),
            Err(SigningError::MalformedToken(_))
        ));
        let address = TEST_USERS[0].to_checksum(None);
        assert!(format!("{address}:0x0011").parse::<SignatureToken>().is_err());
    }
}
