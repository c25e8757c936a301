// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! In-memory ledger client for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::{keccak256, Address, B256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

use super::{ChainClient, ChainClientError, EventEntry, EventKind};

/// Mock ledger client backed by in-memory state.
pub struct MockChainClient {
    head: AtomicU64,
    events: Mutex<HashMap<EventKind, Vec<EventEntry>>>,
    pub gas_price_wei: u128,
    pub chain_id: u64,
    tx_counts: Mutex<HashMap<Address, u64>>,
    default_tx_count: AtomicU64,
    count_latency: Mutex<Duration>,
    /// Raw transactions accepted by `send_raw_transaction`.
    pub submitted: Mutex<Vec<Vec<u8>>>,
    revert_reason: Mutex<Option<String>>,
    fetch_error: Mutex<Option<String>>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            head: AtomicU64::new(0),
            events: Mutex::new(HashMap::new()),
            gas_price_wei: 25_000_000_000,
            chain_id: 43_113,
            tx_counts: Mutex::new(HashMap::new()),
            default_tx_count: AtomicU64::new(0),
            count_latency: Mutex::new(Duration::ZERO),
            submitted: Mutex::new(Vec::new()),
            revert_reason: Mutex::new(None),
            fetch_error: Mutex::new(None),
        }
    }

    /// Append an event entry and advance the head to cover its block.
    pub fn push_event(&self, kind: EventKind, entry: EventEntry) {
        self.head.fetch_max(entry.block_number, Ordering::SeqCst);
        self.events.lock().unwrap().entry(kind).or_default().push(entry);
    }

    pub fn set_head(&self, block: u64) {
        self.head.store(block, Ordering::SeqCst);
    }

    pub fn set_default_tx_count(&self, count: u64) {
        self.default_tx_count.store(count, Ordering::SeqCst);
    }

    pub fn set_tx_count(&self, address: Address, count: u64) {
        self.tx_counts.lock().unwrap().insert(address, count);
    }

    pub fn set_count_latency(&self, latency: Duration) {
        *self.count_latency.lock().unwrap() = latency;
    }

    /// Make estimate/send reject with the given revert reason.
    pub fn set_revert(&self, reason: &str) {
        *self.revert_reason.lock().unwrap() = Some(reason.to_string());
    }

    pub fn clear_revert(&self) {
        *self.revert_reason.lock().unwrap() = None;
    }

    /// Make event fetches fail with an RPC error.
    pub fn set_fetch_error(&self, message: &str) {
        *self.fetch_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn clear_fetch_error(&self) {
        *self.fetch_error.lock().unwrap() = None;
    }
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn block_number(&self) -> Result<u64, ChainClientError> {
        Ok(self.head.load(Ordering::SeqCst))
    }

    async fn fetch_events(
        &self,
        kind: EventKind,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<EventEntry>, ChainClientError> {
        if let Some(message) = self.fetch_error.lock().unwrap().clone() {
            return Err(ChainClientError::Rpc(message));
        }
        let events = self.events.lock().unwrap();
        Ok(events
            .get(&kind)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.block_number >= from_block && e.block_number <= to_block)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn gas_price(&self) -> Result<u128, ChainClientError> {
        Ok(self.gas_price_wei)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, ChainClientError> {
        let latency = *self.count_latency.lock().unwrap();
        if latency > Duration::ZERO {
            tokio::time::sleep(latency).await;
        }
        Ok(self
            .tx_counts
            .lock()
            .unwrap()
            .get(&address)
            .copied()
            .unwrap_or_else(|| self.default_tx_count.load(Ordering::SeqCst)))
    }

    async fn estimate_gas(&self, _tx: &TransactionRequest) -> Result<u64, ChainClientError> {
        if let Some(reason) = self.revert_reason.lock().unwrap().clone() {
            return Err(ChainClientError::Rejected(reason));
        }
        Ok(60_000)
    }

    async fn chain_id(&self) -> Result<u64, ChainClientError> {
        Ok(self.chain_id)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, ChainClientError> {
        if let Some(reason) = self.revert_reason.lock().unwrap().clone() {
            return Err(ChainClientError::Rejected(reason));
        }
        let hash = keccak256(raw);
        self.submitted.lock().unwrap().push(raw.to_vec());
        Ok(hash)
    }
}
