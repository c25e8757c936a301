// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! # Event-Log Poller
//!
//! Background task that keeps the off-chain index consistent with on-chain
//! item lifecycle events (Mint, Burn, ItemTransfer, Deploy).
//!
//! ## Strategy
//!
//! Each cycle fetches new event entries per kind from the kind's durable
//! cursor up to the chain head (in block chunks) and applies them in the
//! order received: Mint creates the item row, Burn deletes it, ItemTransfer
//! updates the transfer count / hold-time average and appends the audit
//! record, Deploy links the operator account to its contract.
//!
//! ## Checkpointing
//!
//! The last processed block is persisted per event kind; on restart the
//! poller resumes from the checkpoint. Applied entries are also recorded in
//! a seen-event set keyed by `tx_hash:log_index`, so refetched entries are
//! never applied twice.
//!
//! ## Failure Semantics
//!
//! An RPC or store error aborts the remainder of the cycle; the next cycle
//! retries from the durable cursor. Per-entry inconsistencies (a transfer
//! for an unindexed item, a deploy for an unregistered address) are skipped
//! with a warning so one bad record can never wedge the cursor.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::chain::{ChainClient, ChainClientError, EventEntry, EventKind, EventPayload};
use crate::index::{IndexError, IndexStore, ItemCache};

/// Default poll interval between cycles.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default block chunk size per event-log query.
const DEFAULT_CHUNK_SIZE: u64 = 2000;

/// How far back to look when starting fresh (no checkpoint).
const INITIAL_LOOKBACK_BLOCKS: u64 = 10_000;

/// Kinds in application order. Mint precedes Transfer so a same-cycle
/// mint-then-transfer sequence resolves against an existing row.
const EVENT_KINDS: [EventKind; 4] = [
    EventKind::Mint,
    EventKind::Burn,
    EventKind::Transfer,
    EventKind::Deploy,
];

/// Errors that abort one poll cycle.
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error(transparent)]
    Chain(#[from] ChainClientError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Chain-to-index reconciliation task.
pub struct EventLogPoller<C> {
    client: Arc<C>,
    store: Arc<IndexStore>,
    cache: Arc<ItemCache>,
    poll_interval: Duration,
    chunk_size: u64,
}

impl<C: ChainClient> EventLogPoller<C> {
    /// Create a poller over the given client and store.
    pub fn new(client: Arc<C>, store: Arc<IndexStore>, cache: Arc<ItemCache>) -> Self {
        Self {
            client,
            store,
            cache,
            poll_interval: DEFAULT_POLL_INTERVAL,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the poll cadence.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the block chunk size.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Run the poll loop until the cancellation token is triggered.
    ///
    /// Should be spawned as a background task:
    /// ```rust,ignore
    /// tokio::spawn(poller.run(shutdown.clone()));
    /// ```
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            interval_secs = self.poll_interval.as_secs(),
            chunk_size = self.chunk_size,
            "event poller starting"
        );

        loop {
            if shutdown.is_cancelled() {
                tracing::info!("event poller shutting down");
                return;
            }

            if let Err(e) = self.poll_step().await {
                tracing::warn!(error = %e, "poll cycle failed, will retry");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {},
                _ = shutdown.cancelled() => {
                    tracing::info!("event poller shutting down");
                    return;
                }
            }
        }
    }

    /// Execute one cycle: drain every event kind up to the chain head.
    async fn poll_step(&self) -> Result<(), PollerError> {
        let head = self.client.block_number().await?;
        let now = Utc::now();

        for kind in EVENT_KINDS {
            self.drain_kind(kind, head, now).await?;
        }
        Ok(())
    }

    /// Fetch and apply all new entries of one kind, advancing its cursor.
    async fn drain_kind(
        &self,
        kind: EventKind,
        head: u64,
        now: DateTime<Utc>,
    ) -> Result<(), PollerError> {
        let mut from = match self.store.cursor(kind.as_str())? {
            Some(cursor) => {
                if cursor >= head {
                    return Ok(());
                }
                cursor + 1
            }
            None => head.saturating_sub(INITIAL_LOOKBACK_BLOCKS),
        };

        while from <= head {
            let to = (from + self.chunk_size - 1).min(head);

            let entries = self.client.fetch_events(kind, from, to).await?;
            let applied = entries.len();
            for entry in entries {
                self.apply(&entry, now)?;
            }
            if applied > 0 {
                tracing::debug!(
                    kind = kind.as_str(),
                    from_block = from,
                    to_block = to,
                    events = applied,
                    "applied event entries"
                );
            }

            self.store.set_cursor(kind.as_str(), to)?;
            from = to + 1;
        }
        Ok(())
    }

    /// Apply a single event entry to the index, exactly once.
    fn apply(&self, entry: &EventEntry, now: DateTime<Utc>) -> Result<(), PollerError> {
        let uid = entry.uid();
        if self.store.is_seen(&uid)? {
            return Ok(());
        }

        match &entry.payload {
            EventPayload::Mint { item_id } => match self.store.create_item(*item_id, now) {
                Ok(_) => self.cache.invalidate(*item_id),
                Err(IndexError::AlreadyExists(_)) => {
                    tracing::warn!(item_id, "mint event for already indexed item, skipping");
                }
                Err(e) => return Err(e.into()),
            },
            EventPayload::Burn { item_id } => {
                self.store.delete_item(*item_id)?;
                self.cache.invalidate(*item_id);
            }
            EventPayload::Transfer { item_id, to, from } => {
                let tx_id = format!("{:#x}", entry.tx_hash);
                match self.store.record_transfer(
                    *item_id,
                    &format!("{to:#x}"),
                    &format!("{from:#x}"),
                    now,
                    &tx_id,
                ) {
                    Ok(_) => self.cache.invalidate(*item_id),
                    Err(IndexError::MissingItem(_)) => {
                        tracing::warn!(item_id, %tx_id, "transfer for unindexed item, skipping");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            EventPayload::Deploy { operator, contract } => {
                let operator_addr = format!("{operator:#x}");
                match self.store.account_for_address(&operator_addr)? {
                    Some(account_id) => {
                        match self
                            .store
                            .create_operator(&account_id, &format!("{contract:#x}"))
                        {
                            Ok(()) => {}
                            Err(IndexError::AlreadyExists(_)) => {
                                tracing::warn!(
                                    %account_id,
                                    "deploy event for already registered operator, skipping"
                                );
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                    None => {
                        tracing::warn!(
                            operator = %operator_addr,
                            "deploy event for unregistered operator address, skipping"
                        );
                    }
                }
            }
        }

        self.store.mark_seen(&uid)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
