// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RPC_URL` | Ledger JSON-RPC endpoint | Required |
//! | `CONTRACT_ADDRESS` | Item-token contract address | Required |
//! | `PROXY_ADDRESS` | Proxy dispatcher contract address | Optional |
//! | `DATA_DIR` | Root directory for the embedded index database | `/data` |
//! | `POLL_INTERVAL_SECS` | Seconds between event-poll cycles | `5` |
//! | `SUBMIT_TIMEOUT_SECS` | Timeout for ledger submission | `30` |
//! | `CHUNK_SIZE` | Block range per event-log query | `2000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::Address;

/// Environment variable name for the ledger RPC endpoint.
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Environment variable name for the item-token contract address.
pub const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";

/// Environment variable name for the proxy dispatcher contract address.
pub const PROXY_ADDRESS_ENV: &str = "PROXY_ADDRESS";

/// Environment variable name for the index database directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the poll cadence in seconds.
pub const POLL_INTERVAL_ENV: &str = "POLL_INTERVAL_SECS";

/// Environment variable name for the submission timeout in seconds.
pub const SUBMIT_TIMEOUT_ENV: &str = "SUBMIT_TIMEOUT_SECS";

/// Environment variable name for the event-log chunk size in blocks.
pub const CHUNK_SIZE_ENV: &str = "CHUNK_SIZE";

const DEFAULT_DATA_DIR: &str = "/data";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CHUNK_SIZE: u64 = 2000;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub contract_address: Address,
    pub proxy_address: Option<Address>,
    pub data_dir: PathBuf,
    pub poll_interval: Duration,
    pub submit_timeout: Duration,
    pub chunk_size: u64,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let rpc_url = env::var(RPC_URL_ENV).map_err(|_| ConfigError::Missing(RPC_URL_ENV))?;

        let contract_address = env::var(CONTRACT_ADDRESS_ENV)
            .map_err(|_| ConfigError::Missing(CONTRACT_ADDRESS_ENV))?
            .parse::<Address>()
            .map_err(|e| ConfigError::Invalid {
                var: CONTRACT_ADDRESS_ENV,
                message: e.to_string(),
            })?;

        let proxy_address = match env::var(PROXY_ADDRESS_ENV) {
            Ok(raw) => Some(raw.parse::<Address>().map_err(|e| ConfigError::Invalid {
                var: PROXY_ADDRESS_ENV,
                message: e.to_string(),
            })?),
            Err(_) => None,
        };

        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let poll_interval =
            Duration::from_secs(parse_u64(POLL_INTERVAL_ENV, DEFAULT_POLL_INTERVAL_SECS)?);
        let submit_timeout =
            Duration::from_secs(parse_u64(SUBMIT_TIMEOUT_ENV, DEFAULT_SUBMIT_TIMEOUT_SECS)?);
        let chunk_size = parse_u64(CHUNK_SIZE_ENV, DEFAULT_CHUNK_SIZE)?;

        Ok(Self {
            rpc_url,
            contract_address,
            proxy_address,
            data_dir,
            poll_interval,
            submit_timeout,
            chunk_size,
        })
    }
}

fn parse_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
            var,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}
