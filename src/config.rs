// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`Config`] loaded once at startup. Any error here aborts the process before
//! the HTTP listener is bound.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PRIVATE_KEY` | Base64 `flag ‖ secret` Ed25519 key of the service | Required |
//! | `SUI_NETWORK` | Network profile (`devnet`, `testnet`, `mainnet`, `localnet`) | `devnet` |
//! | `SUI_RPC_URL` | Full node URL overriding the profile's | Profile URL |
//! | `PACKAGE_ID` | Published EduverseX package id | From addresses file |
//! | `EDUVERSEX_DB` | Shared database object id | From addresses file |
//! | `CONTRACT_ADDRESSES_PATH` | JSON file with `PACKAGE_ID` and `EDUVERSEX_DB` | `addresses/smc_address.json` |
//! | `GAS_BUDGET` | Gas budget per transaction, in MIST | `50000000` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    fmt, fs,
    net::{IpAddr, SocketAddr},
    path::Path,
};

use serde::Deserialize;

use crate::blockchain::{
    network_by_name, NetworkConfig, ObjectId, DEFAULT_GAS_BUDGET, DEFAULT_NETWORK,
};

pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const SUI_NETWORK_ENV: &str = "SUI_NETWORK";
pub const SUI_RPC_URL_ENV: &str = "SUI_RPC_URL";
pub const PACKAGE_ID_ENV: &str = "PACKAGE_ID";
pub const EDUVERSEX_DB_ENV: &str = "EDUVERSEX_DB";
pub const CONTRACT_ADDRESSES_PATH_ENV: &str = "CONTRACT_ADDRESSES_PATH";
pub const GAS_BUDGET_ENV: &str = "GAS_BUDGET";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable selecting `json` or `pretty` log output.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const DEFAULT_CONTRACT_ADDRESSES_PATH: &str = "addresses/smc_address.json";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to read contract addresses from {path}: {reason}")]
    AddressesFile { path: String, reason: String },
}

/// On-chain program and state object every call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub package_id: ObjectId,
    pub database_id: ObjectId,
}

/// Shape of the contract addresses file written at publish time.
#[derive(Debug, Default, Deserialize)]
struct AddressesFile {
    #[serde(rename = "PACKAGE_ID")]
    package_id: Option<String>,
    #[serde(rename = "EDUVERSEX_DB")]
    database_id: Option<String>,
}

/// Process configuration.
#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub network: NetworkConfig,
    pub rpc_url: Option<String>,
    pub gas_budget: u64,
    pub addresses: ContractAddresses,
    /// Base64 signing key; only handed to `Credential::from_base64`.
    pub private_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("network", &self.network.name)
            .field("rpc_url", &self.rpc_url)
            .field("gas_budget", &self.gas_budget)
            .field("addresses", &self.addresses)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let private_key = get(PRIVATE_KEY_ENV).ok_or(ConfigError::Missing(PRIVATE_KEY_ENV))?;

        let network_name = get(SUI_NETWORK_ENV).unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        let network = network_by_name(&network_name).ok_or_else(|| ConfigError::Invalid {
            name: SUI_NETWORK_ENV,
            reason: format!("unknown network `{network_name}`"),
        })?;

        let gas_budget = match get(GAS_BUDGET_ENV) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: GAS_BUDGET_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_GAS_BUDGET,
        };

        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let host_raw = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_raw.parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
            name: HOST_ENV,
            reason: format!("`{host_raw}`: {e}"),
        })?;

        let addresses_path = get(CONTRACT_ADDRESSES_PATH_ENV)
            .unwrap_or_else(|| DEFAULT_CONTRACT_ADDRESSES_PATH.to_string());
        let file = read_addresses_file(Path::new(&addresses_path))?;

        let package_id = get(PACKAGE_ID_ENV)
            .or(file.package_id)
            .ok_or(ConfigError::Missing(PACKAGE_ID_ENV))?;
        let database_id = get(EDUVERSEX_DB_ENV)
            .or(file.database_id)
            .ok_or(ConfigError::Missing(EDUVERSEX_DB_ENV))?;

        Ok(Self {
            host,
            port,
            network,
            rpc_url: get(SUI_RPC_URL_ENV),
            gas_budget,
            addresses: ContractAddresses {
                package_id: parse_object_id(PACKAGE_ID_ENV, &package_id)?,
                database_id: parse_object_id(EDUVERSEX_DB_ENV, &database_id)?,
            },
            private_key,
        })
    }

    /// Socket address the HTTP listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// A missing file is not an error; the ids may come from the environment.
fn read_addresses_file(path: &Path) -> Result<AddressesFile, ConfigError> {
    if !path.exists() {
        return Ok(AddressesFile::default());
    }
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::AddressesFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::AddressesFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_object_id(name: &'static str, raw: &str) -> Result<ObjectId, ConfigError> {
    raw.parse().map_err(|e: crate::blockchain::AddressParseError| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}
