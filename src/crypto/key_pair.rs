//! ed25519 key material in NEAR's string encoding
//!
//! Keys travel as `<curve>:<base58 payload>`. Secret keys use the 64-byte
//! expanded form (seed followed by public key); a bare 32-byte seed is
//! accepted too and expanded before it reaches the NEAR client.

use crate::{Error, Result};
use ed25519_dalek::SigningKey;
use near_workspaces::types::SecretKey;
use std::fmt;
use std::str::FromStr;

const ED25519_PREFIX: &str = "ed25519";
const SEED_LEN: usize = 32;
const EXPANDED_LEN: usize = 64;

/// Signing identity of the client account
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Parse a secret key string such as `ed25519:3D4Y...`
    pub fn from_string(secret_key: &str) -> Result<Self> {
        let bytes = decode_key_payload(secret_key.trim())?;

        match bytes.len() {
            SEED_LEN => {
                let mut seed = [0u8; SEED_LEN];
                seed.copy_from_slice(&bytes);
                Ok(Self::from_seed(seed))
            }
            EXPANDED_LEN => {
                let mut expanded = [0u8; EXPANDED_LEN];
                expanded.copy_from_slice(&bytes);
                let signing_key = SigningKey::from_keypair_bytes(&expanded).map_err(|_| {
                    Error::key_format("public half does not match the secret seed")
                })?;
                Ok(Self { signing_key })
            }
            other => Err(Error::key_format(format!(
                "secret key must be {} or {} bytes, got {}",
                SEED_LEN, EXPANDED_LEN, other
            ))),
        }
    }

    /// Build a key pair from a 32-byte seed
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Public key as `ed25519:<base58>`
    pub fn public_key(&self) -> String {
        format!(
            "{}:{}",
            ED25519_PREFIX,
            bs58::encode(self.signing_key.verifying_key().to_bytes()).into_string()
        )
    }

    /// Secret key in the expanded `ed25519:<base58>` form accepted by
    /// [`KeyPair::from_string`]
    pub fn secret_key(&self) -> String {
        format!(
            "{}:{}",
            ED25519_PREFIX,
            bs58::encode(self.signing_key.to_keypair_bytes()).into_string()
        )
    }

    /// The same key as the NEAR client's signer type
    pub fn to_signer_key(&self) -> Result<SecretKey> {
        SecretKey::from_str(&self.secret_key())
            .map_err(|e| Error::key_format(format!("rejected by NEAR client: {}", e)))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl FromStr for KeyPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

/// Split off the curve prefix and base58-decode the payload
fn decode_key_payload(encoded: &str) -> Result<Vec<u8>> {
    let payload = match encoded.split_once(':') {
        Some((curve, payload)) => {
            if !curve.eq_ignore_ascii_case(ED25519_PREFIX) {
                return Err(Error::key_format(format!("unsupported key type '{}'", curve)));
            }
            payload
        }
        None => encoded,
    };

    if payload.is_empty() {
        return Err(Error::key_format("empty key payload"));
    }

    bs58::decode(payload)
        .into_vec()
        .map_err(|e| Error::key_format(format!("invalid base58: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_roundtrip() {
        let key_pair = KeyPair::from_seed([7u8; 32]);
        let encoded = key_pair.secret_key();
        assert!(encoded.starts_with("ed25519:"));

        let parsed = KeyPair::from_string(&encoded).unwrap();
        assert_eq!(parsed.public_key(), key_pair.public_key());
    }

    #[test]
    fn test_seed_only_secret_key() {
        let seed = [9u8; 32];
        let encoded = format!("ed25519:{}", bs58::encode(seed).into_string());

        let parsed = KeyPair::from_string(&encoded).unwrap();
        assert_eq!(parsed.public_key(), KeyPair::from_seed(seed).public_key());
    }

    #[test]
    fn test_missing_prefix_defaults_to_ed25519() {
        let key_pair = KeyPair::from_seed([3u8; 32]);
        let without_prefix = key_pair.secret_key().trim_start_matches("ed25519:").to_string();

        let parsed = KeyPair::from_string(&without_prefix).unwrap();
        assert_eq!(parsed.public_key(), key_pair.public_key());
    }

    #[test]
    fn test_rejects_unsupported_curve() {
        let err = KeyPair::from_string("secp256k1:abc").unwrap_err();
        assert!(err.to_string().contains("unsupported key type"));
    }

    #[test]
    fn test_rejects_bad_base58() {
        let err = KeyPair::from_string("ed25519:0OIl").unwrap_err();
        assert!(err.to_string().contains("invalid base58"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let encoded = format!("ed25519:{}", bs58::encode([1u8; 16]).into_string());
        let err = KeyPair::from_string(&encoded).unwrap_err();
        assert!(err.to_string().contains("got 16"));
    }

    #[test]
    fn test_rejects_mismatched_public_half() {
        let mut expanded = KeyPair::from_seed([1u8; 32]).signing_key.to_keypair_bytes();
        let other = KeyPair::from_seed([2u8; 32]).signing_key.verifying_key().to_bytes();
        expanded[32..].copy_from_slice(&other);
        let encoded = format!("ed25519:{}", bs58::encode(expanded).into_string());

        assert!(KeyPair::from_string(&encoded).is_err());
    }

    #[test]
    fn test_signer_key_matches_public_key() {
        let key_pair = KeyPair::from_seed([5u8; 32]);
        let signer = key_pair.to_signer_key().unwrap();
        assert_eq!(signer.public_key().to_string(), key_pair.public_key());
    }

    #[test]
    fn test_seed_is_expanded_for_signer() {
        let seed = [11u8; 32];
        let encoded = format!("ed25519:{}", bs58::encode(seed).into_string());

        let signer = KeyPair::from_string(&encoded).unwrap().to_signer_key().unwrap();
        assert_eq!(signer.public_key().to_string(), KeyPair::from_seed(seed).public_key());
    }

    #[test]
    fn test_debug_hides_secret() {
        let key_pair = KeyPair::from_seed([5u8; 32]);
        let debug = format!("{:?}", key_pair);
        assert!(!debug.contains(&key_pair.secret_key()));
        assert!(debug.contains("public_key"));
    }
}
