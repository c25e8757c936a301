// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! # Ledger Access
//!
//! The [`ChainClient`] port abstracts the ledger RPC surface the core
//! depends on: event-log queries for the poller and gas/nonce/submission
//! primitives for the transaction pipeline. [`client::RpcChainClient`] is
//! the alloy-backed HTTP implementation; tests use the in-memory mock.

use alloy::primitives::{Address, B256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

pub mod client;
pub mod contract;
pub mod pipeline;
pub mod revert;

#[cfg(test)]
pub mod mock;

pub use client::RpcChainClient;
pub use contract::ItemContract;
pub use pipeline::{CallTarget, PendingCall, PipelineError, TransactionPipeline, TxReceipt};

/// Contract event kinds the poller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Mint,
    Burn,
    Transfer,
    Deploy,
}

impl EventKind {
    /// Stable key used for the durable cursor.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Mint => "mint",
            EventKind::Burn => "burn",
            EventKind::Transfer => "transfer",
            EventKind::Deploy => "deploy",
        }
    }
}

/// Decoded payload of one contract event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Mint {
        item_id: u64,
    },
    Burn {
        item_id: u64,
    },
    Transfer {
        item_id: u64,
        to: Address,
        from: Address,
    },
    Deploy {
        operator: Address,
        contract: Address,
    },
}

/// One event-log entry, positioned in the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub payload: EventPayload,
    pub block_number: u64,
    pub tx_hash: B256,
    pub log_index: u64,
}

impl EventEntry {
    /// Unique id of this entry, stable across refetches.
    pub fn uid(&self) -> String {
        format!("{:#x}:{}", self.tx_hash, self.log_index)
    }
}

/// Errors raised by ledger access.
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Contract error: {0}")]
    Contract(String),

    /// The ledger rejected the call; carries the revert reason.
    #[error("Transaction rejected: {0}")]
    Rejected(String),
}

/// Port over the ledger RPC surface the core depends on.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current chain head block number.
    async fn block_number(&self) -> Result<u64, ChainClientError>;

    /// Fetch decoded event entries of one kind for a block range
    /// (inclusive), in log order.
    async fn fetch_events(
        &self,
        kind: EventKind,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<EventEntry>, ChainClientError>;

    /// Current network gas price in wei.
    async fn gas_price(&self) -> Result<u128, ChainClientError>;

    /// Number of transactions sent from an address (the next nonce).
    async fn transaction_count(&self, address: Address) -> Result<u64, ChainClientError>;

    /// Estimate gas for a call. Fails with [`ChainClientError::Rejected`]
    /// when the call would revert.
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainClientError>;

    /// Chain id for transaction replay protection.
    async fn chain_id(&self) -> Result<u64, ChainClientError>;

    /// Broadcast a raw signed transaction; returns its hash.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, ChainClientError>;
}
