// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Service signing credential.
//!
//! The service acts on-chain through a single Ed25519 key. The key is supplied
//! as base64 of `flag ‖ secret` (the Sui keystore format), where the leading
//! flag byte names the signature scheme and must be `0x00` (Ed25519).

use std::fmt;

use base64ct::{Base64, Encoding};
use blake2::{digest::consts::U32, Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};

use super::types::SuiAddress;

/// Blake2b with a 256-bit output, used for addresses and transaction digests.
pub type Blake2b256 = Blake2b<U32>;

/// Signature scheme flag for Ed25519.
pub const ED25519_FLAG: u8 = 0x00;

/// Intent prefix for transaction data: scope `TransactionData`, version `V0`, app `Sui`.
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

const SECRET_KEY_LENGTH: usize = 32;

/// Errors raised while loading the signing credential.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("private key is missing or empty")]
    Missing,

    #[error("private key is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("private key must decode to {expected} bytes (flag + secret), got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unsupported signature scheme flag {0:#04x}, only Ed25519 is supported")]
    UnsupportedScheme(u8),
}

/// The service's on-chain identity.
///
/// Immutable after load; share it behind an `Arc`.
pub struct Credential {
    signing_key: SigningKey,
    address: SuiAddress,
}

impl Credential {
    /// Load the credential from its base64 keystore encoding.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(KeyError::Missing);
        }

        let decoded =
            Base64::decode_vec(encoded).map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;

        if decoded.len() != SECRET_KEY_LENGTH + 1 {
            return Err(KeyError::InvalidLength {
                expected: SECRET_KEY_LENGTH + 1,
                actual: decoded.len(),
            });
        }
        if decoded[0] != ED25519_FLAG {
            return Err(KeyError::UnsupportedScheme(decoded[0]));
        }

        let mut secret = [0u8; SECRET_KEY_LENGTH];
        secret.copy_from_slice(&decoded[1..]);
        Ok(Self::from_secret_bytes(secret))
    }

    /// Build a credential directly from 32 secret key bytes.
    pub fn from_secret_bytes(secret: [u8; SECRET_KEY_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(&secret);
        let address = derive_address(&signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            address,
        }
    }

    /// The address derived from the public key.
    pub fn address(&self) -> SuiAddress {
        self.address
    }

    /// Raw Ed25519 public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign BCS-encoded `TransactionData` and return the serialized signature
    /// (`flag ‖ signature ‖ public key`) in base64, as the node expects it.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> String {
        let digest = transaction_digest(tx_bytes);
        let signature = self.signing_key.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key());
        Base64::encode_string(&serialized)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derive a Sui address: `blake2b256(flag ‖ public key)`.
pub fn derive_address(public_key: &[u8; 32]) -> SuiAddress {
    let mut hasher = Blake2b256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(public_key);
    SuiAddress::new(hasher.finalize().into())
}

/// Digest that is actually signed: `blake2b256(intent ‖ tx_bytes)`.
pub fn transaction_digest(tx_bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(TRANSACTION_INTENT);
    hasher.update(tx_bytes);
    hasher.finalize().into()
}
