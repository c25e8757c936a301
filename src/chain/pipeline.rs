// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Transaction signing and dispatch.
//!
//! The pipeline decrypts the caller's account key, assembles a legacy
//! (gas-price) transaction against live chain state, signs it locally, and
//! broadcasts the raw bytes. Ledger rejections are routed through the
//! revert translator so callers only ever see domain errors.
//!
//! Nonce assignment is serialized per signing account: concurrent
//! submissions from one account reserve strictly increasing nonces from a
//! mutex-guarded counter seeded by the on-chain transaction count. A
//! failed send hands back only its own reservation, so nonces held by
//! still-in-flight submissions are never reissued.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxKind, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::network::TxSignerSync;
use alloy::signers::local::PrivateKeySigner;
use tokio::sync::Mutex;

use super::{contract, revert, ChainClient, ChainClientError};
use crate::error::DomainError;
use crate::vault;

/// Default timeout for ledger submission.
const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a pending call is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// Call the contract directly.
    Direct { contract: Address },
    /// A shared dispatcher contract acts on behalf of the target contract.
    Proxy {
        dispatcher: Address,
        target: Address,
    },
}

/// A transaction-signing request. Constructed per caller action, consumed
/// immediately by [`TransactionPipeline::submit`], discarded afterwards.
#[derive(Debug, Clone)]
pub struct PendingCall {
    pub target: CallTarget,
    /// ABI-encoded function call.
    pub calldata: Bytes,
    /// Hex ciphertext of the signer's private key.
    pub encrypted_key: String,
    /// Caller-supplied passphrase for the key.
    pub passphrase: String,
}

impl PendingCall {
    /// Call against a contract directly.
    pub fn direct(
        contract: Address,
        calldata: Bytes,
        encrypted_key: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            target: CallTarget::Direct { contract },
            calldata,
            encrypted_key: encrypted_key.into(),
            passphrase: passphrase.into(),
        }
    }

    /// Call through the proxy dispatcher on behalf of a target contract.
    pub fn proxied(
        dispatcher: Address,
        target: Address,
        calldata: Bytes,
        encrypted_key: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            target: CallTarget::Proxy { dispatcher, target },
            calldata,
            encrypted_key: encrypted_key.into(),
            passphrase: passphrase.into(),
        }
    }
}

/// Handle for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub sender: Address,
    pub nonce: u64,
}

/// Errors raised by [`TransactionPipeline::submit`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("submission timed out after {0:?}")]
    Timeout(Duration),
}

/// Builds, signs, and submits on-chain transactions.
pub struct TransactionPipeline<C> {
    client: Arc<C>,
    nonces: NonceManager,
    submit_timeout: Duration,
}

impl<C: ChainClient> TransactionPipeline<C> {
    /// Create a pipeline over the given ledger client.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            nonces: NonceManager::new(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Override the submission timeout.
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Sign and submit a pending call; returns the transaction handle.
    pub async fn submit(&self, call: PendingCall) -> Result<TxReceipt, PipelineError> {
        let signer = load_signer(&call.encrypted_key, &call.passphrase)?;
        let sender = signer.address();

        let (to, input) = match call.target {
            CallTarget::Direct { contract } => (contract, call.calldata),
            CallTarget::Proxy { dispatcher, target } => {
                (dispatcher, contract::proxy_execute(target, call.calldata))
            }
        };

        let gas_price = self.client.gas_price().await.map_err(infra)?;
        let chain_id = self.client.chain_id().await.map_err(infra)?;
        let nonce = self
            .nonces
            .reserve(self.client.as_ref(), sender)
            .await
            .map_err(infra)?;

        // Every failure past this point must hand the reservation back, or
        // the cached counter desyncs and later submissions wedge behind a
        // nonce gap.
        match self
            .broadcast(&signer, sender, to, input, gas_price, chain_id, nonce)
            .await
        {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                self.nonces.release(sender, nonce).await;
                Err(e)
            }
        }
    }

    /// Estimate, sign, and broadcast one transaction with a reserved nonce.
    #[allow(clippy::too_many_arguments)]
    async fn broadcast(
        &self,
        signer: &PrivateKeySigner,
        sender: Address,
        to: Address,
        input: Bytes,
        gas_price: u128,
        chain_id: u64,
        nonce: u64,
    ) -> Result<TxReceipt, PipelineError> {
        let mut request = TransactionRequest::default()
            .from(sender)
            .to(to)
            .input(input.clone().into());
        request.nonce = Some(nonce);
        request.gas_price = Some(gas_price);

        let gas_limit = self
            .client
            .estimate_gas(&request)
            .await
            .map_err(reject_or_infra)?;

        let mut tx = TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price,
            gas_limit,
            to: TxKind::Call(to),
            value: U256::ZERO,
            input,
        };
        let signature = signer
            .sign_transaction_sync(&mut tx)
            .map_err(|_| DomainError::PrivateKey)?;
        let raw = TxEnvelope::Legacy(tx.into_signed(signature)).encoded_2718();

        let sent = tokio::time::timeout(
            self.submit_timeout,
            self.client.send_raw_transaction(&raw),
        )
        .await;

        match sent {
            Ok(Ok(tx_hash)) => Ok(TxReceipt {
                tx_hash,
                sender,
                nonce,
            }),
            Ok(Err(e)) => Err(reject_or_infra(e)),
            Err(_) => Err(PipelineError::Timeout(self.submit_timeout)),
        }
    }
}

/// Decrypt and parse the signer's account key.
fn load_signer(encrypted_key: &str, passphrase: &str) -> Result<PrivateKeySigner, DomainError> {
    let plaintext =
        vault::decrypt(encrypted_key, passphrase).map_err(|_| DomainError::PrivateKey)?;
    let hex_key = std::str::from_utf8(&plaintext).map_err(|_| DomainError::PrivateKey)?;
    let key_bytes = alloy::hex::decode(hex_key.trim()).map_err(|_| DomainError::PrivateKey)?;
    PrivateKeySigner::from_slice(&key_bytes).map_err(|_| DomainError::PrivateKey)
}

/// Map a transport failure into the pipeline error space.
fn infra(e: ChainClientError) -> PipelineError {
    PipelineError::Rpc(e.to_string())
}

/// Rejections carry a revert reason and become domain errors; everything
/// else stays a transport failure.
fn reject_or_infra(e: ChainClientError) -> PipelineError {
    match e {
        ChainClientError::Rejected(reason) => revert::translate(&reason).into(),
        other => PipelineError::Rpc(other.to_string()),
    }
}

// =============================================================================
// Nonce reservation
// =============================================================================

/// Per-account monotonic nonce reservation.
///
/// The per-account lock is held across the chain-count fetch, so two
/// concurrent submissions from one account can never read the same count.
/// A failed send releases only its own reservation: the top of the range
/// rolls the counter back, anything below an outstanding reservation joins
/// a reuse pool consumed lowest-first. Reservations handed out while other
/// sends are still in flight are never reissued.
struct NonceManager {
    slots: Mutex<HashMap<Address, Arc<Mutex<NonceSlot>>>>,
}

/// Nonce state for one account: the next fresh nonce plus reservations
/// handed back by failed sends.
#[derive(Default)]
struct NonceSlot {
    next: Option<u64>,
    freed: BTreeSet<u64>,
}

impl NonceManager {
    fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    async fn slot(&self, address: Address) -> Arc<Mutex<NonceSlot>> {
        self.slots
            .lock()
            .await
            .entry(address)
            .or_default()
            .clone()
    }

    async fn reserve<C: ChainClient>(
        &self,
        client: &C,
        address: Address,
    ) -> Result<u64, ChainClientError> {
        let slot = self.slot(address).await;
        let mut slot = slot.lock().await;
        let chain_count = client.transaction_count(address).await?;

        // Released nonces below the chain count were filled on-chain in
        // the meantime; the rest refill gaps before fresh nonces are used.
        slot.freed.retain(|&n| n >= chain_count);
        if let Some(lowest) = slot.freed.pop_first() {
            return Ok(lowest);
        }

        let nonce = slot.next.map_or(chain_count, |n| n.max(chain_count));
        slot.next = Some(nonce + 1);
        Ok(nonce)
    }

    /// Hand back a reservation whose send failed.
    async fn release(&self, address: Address, nonce: u64) {
        let slot = self.slot(address).await;
        let mut slot = slot.lock().await;
        if slot.next == Some(nonce + 1) {
            slot.next = Some(nonce);
        } else {
            slot.freed.insert(nonce);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
