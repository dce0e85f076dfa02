// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of MIST in one SUI.
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// Move type of the native gas coin.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Length in bytes of Sui addresses and object ids.
pub const ADDRESS_LENGTH: usize = 32;

/// Sui network configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Profile name (`devnet`, `testnet`, ...)
    pub name: &'static str,
    /// Full node JSON-RPC endpoint
    pub rpc_url: &'static str,
}

/// Sui Devnet configuration.
pub const SUI_DEVNET: NetworkConfig = NetworkConfig {
    name: "devnet",
    rpc_url: "https://fullnode.devnet.sui.io:443",
};

/// Sui Testnet configuration.
pub const SUI_TESTNET: NetworkConfig = NetworkConfig {
    name: "testnet",
    rpc_url: "https://fullnode.testnet.sui.io:443",
};

/// Sui Mainnet configuration.
pub const SUI_MAINNET: NetworkConfig = NetworkConfig {
    name: "mainnet",
    rpc_url: "https://fullnode.mainnet.sui.io:443",
};

/// Local `sui start` network.
pub const SUI_LOCALNET: NetworkConfig = NetworkConfig {
    name: "localnet",
    rpc_url: "http://127.0.0.1:9000",
};

/// Network profile used when none is configured.
pub const DEFAULT_NETWORK: &str = "devnet";

/// Look up a network profile by name (case-insensitive).
pub fn network_by_name(raw: &str) -> Option<NetworkConfig> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "devnet" => Some(SUI_DEVNET),
        "testnet" => Some(SUI_TESTNET),
        "mainnet" => Some(SUI_MAINNET),
        "localnet" => Some(SUI_LOCALNET),
        _ => None,
    }
}

/// A 32-byte Sui account address.
///
/// Serializes to BCS as 32 raw bytes. The textual form is `0x` followed by
/// 64 lowercase hex characters; shorter hex input (e.g. `0x2`) is left-padded.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

/// Object ids share the address representation.
pub type ObjectId = SuiAddress;

impl SuiAddress {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl FromStr for SuiAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| AddressParseError::MissingPrefix(trimmed.to_string()))?;

        if hex_part.is_empty() || hex_part.len() > ADDRESS_LENGTH * 2 {
            return Err(AddressParseError::InvalidLength(hex_part.len()));
        }

        let padded = format!("{:0>width$}", hex_part, width = ADDRESS_LENGTH * 2);
        let bytes = hex::decode(&padded).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;

        let mut out = [0u8; ADDRESS_LENGTH];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({self})")
    }
}

/// Errors from parsing a textual address or object id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("address must have 1 to 64 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("address is not valid hex: {0}")]
    InvalidHex(String),
}

/// Digest of an object version, BCS-encoded as a length-prefixed byte vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDigest(Vec<u8>);

impl ObjectDigest {
    /// Decode the base58 form returned by the JSON-RPC API.
    pub fn from_base58(raw: &str) -> Result<Self, String> {
        let bytes = bs58::decode(raw)
            .into_vec()
            .map_err(|e| format!("invalid base58 digest {raw}: {e}"))?;
        if bytes.len() != 32 {
            return Err(format!("digest must be 32 bytes, got {}", bytes.len()));
        }
        Ok(Self(bytes))
    }
}

/// `(id, version, digest)` reference to a specific object version.
pub type ObjectRef = (ObjectId, u64, ObjectDigest);

/// Convert a signed MIST amount to whole SUI, discarding the sign.
///
/// Balance changes are negative for debits; the reported cost is the magnitude.
pub fn mist_to_sui(amount: i128) -> f64 {
    amount.unsigned_abs() as f64 / MIST_PER_SUI as f64
}
