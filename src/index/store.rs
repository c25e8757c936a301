// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Embedded index database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `items`: item id → serialized ItemRecord
//! - `transferlog`: tx_id → serialized TransferRecord
//! - `item_transfer_index`: composite key (item_id_be|!timestamp|tx_id) → ()
//! - `operators`: account id → contract address
//! - `operator_contracts`: contract address → account id
//! - `accounts`: lowercase on-chain address → account id
//! - `poller_state`: key → value bytes (per-kind cursors)
//! - `seen_events`: event uid → ()

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::models::{ItemRecord, OperatorRecord, TransferRecord};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: item id → serialized ItemRecord (JSON bytes).
const ITEMS: TableDefinition<u64, &[u8]> = TableDefinition::new("items");

/// Audit log: tx_id → serialized TransferRecord (JSON bytes).
const TRANSFER_LOG: TableDefinition<&str, &[u8]> = TableDefinition::new("transferlog");

/// Index: composite key → ().
/// Key format: `item_id_be|!timestamp_be|tx_id` for descending-time scans.
const ITEM_TRANSFER_INDEX: TableDefinition<&[u8], ()> =
    TableDefinition::new("item_transfer_index");

/// Map: account id → operated contract address.
const OPERATORS: TableDefinition<&str, &str> = TableDefinition::new("operators");

/// Reverse map: contract address → account id (enforces uniqueness).
const OPERATOR_CONTRACTS: TableDefinition<&str, &str> = TableDefinition::new("operator_contracts");

/// Map: lowercase on-chain address → account id.
const ACCOUNTS: TableDefinition<&str, &str> = TableDefinition::new("accounts");

/// Poller state: key → value bytes (e.g., "cursor_mint" → u64 big-endian).
const POLLER_STATE: TableDefinition<&str, &[u8]> = TableDefinition::new("poller_state");

/// Applied-event set: `tx_hash:log_index` → ().
const SEEN_EVENTS: TableDefinition<&str, ()> = TableDefinition::new("seen_events");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("item {0} is not indexed")]
    MissingItem(u64),

    #[error("already indexed: {0}")]
    AlreadyExists(String),
}

pub type IndexResult<T> = Result<T, IndexError>;

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a composite key for the item_transfer_index table.
///
/// Format: `item_id_be_bytes | inverted_timestamp_be_bytes | tx_id`
///
/// The inverted timestamp ensures newest-first ordering when scanning forward.
fn make_transfer_key(item_id: u64, timestamp: i64, tx_id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + 1 + 8 + 1 + tx_id.len());
    key.extend_from_slice(&item_id.to_be_bytes());
    key.push(b'|');
    key.extend_from_slice(&(!timestamp as u64).to_be_bytes());
    key.push(b'|');
    key.extend_from_slice(tx_id.as_bytes());
    key
}

/// Build a prefix for range-scanning all transfers of one item.
fn make_transfer_prefix(item_id: u64) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(8 + 1);
    prefix.extend_from_slice(&item_id.to_be_bytes());
    prefix.push(b'|');
    prefix
}

/// Upper bound for a transfer range scan (prefix with 0xFF bytes appended).
fn make_transfer_prefix_end(item_id: u64) -> Vec<u8> {
    let mut end = make_transfer_prefix(item_id);
    end.extend_from_slice(&[0xFF; 20]);
    end
}

/// Extract the tx_id portion from a composite index key.
fn extract_tx_id_from_key(key: &[u8]) -> Option<String> {
    // Skip `item_id_be | !timestamp_be |` (8 + 1 + 8 + 1 bytes).
    const PREFIX_LEN: usize = 18;
    if key.len() <= PREFIX_LEN {
        return None;
    }
    String::from_utf8(key[PREFIX_LEN..].to_vec()).ok()
}

// =============================================================================
// IndexStore
// =============================================================================

/// Embedded ACID index over on-chain item state.
pub struct IndexStore {
    db: Database,
}

impl IndexStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> IndexResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ITEMS)?;
            let _ = write_txn.open_table(TRANSFER_LOG)?;
            let _ = write_txn.open_table(ITEM_TRANSFER_INDEX)?;
            let _ = write_txn.open_table(OPERATORS)?;
            let _ = write_txn.open_table(OPERATOR_CONTRACTS)?;
            let _ = write_txn.open_table(ACCOUNTS)?;
            let _ = write_txn.open_table(POLLER_STATE)?;
            let _ = write_txn.open_table(SEEN_EVENTS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Insert the row for a newly minted item.
    ///
    /// Fails with [`IndexError::AlreadyExists`] if the id is already indexed;
    /// the existing row (and its transfer count) is left untouched.
    pub fn create_item(
        &self,
        id: u64,
        creation_date: DateTime<Utc>,
    ) -> IndexResult<ItemRecord> {
        let record = ItemRecord::new(id, creation_date);
        let json = serde_json::to_vec(&record)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ITEMS)?;
            if table.get(id)?.is_some() {
                return Err(IndexError::AlreadyExists(format!("item {id}")));
            }
            table.insert(id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(record)
    }

    /// Remove an item row. Returns whether a row existed.
    pub fn delete_item(&self, id: u64) -> IndexResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(ITEMS)?;
            let existed = table.remove(id)?.is_some();
            existed
        };
        write_txn.commit()?;
        Ok(removed)
    }

    /// Look up a single item by id.
    pub fn get_item(&self, id: u64) -> IndexResult<Option<ItemRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Apply one transfer event to an item and append its audit record.
    ///
    /// Recomputes the hold-time average from total elapsed time and the
    /// current transfer count (first transfer takes the full elapsed time),
    /// increments the count, and clears any standing missing-item report.
    /// The whole update is one write transaction. Replaying an already
    /// recorded tx_id is a no-op that returns the stored item unchanged.
    pub fn record_transfer(
        &self,
        item_id: u64,
        to_address: &str,
        from_address: &str,
        timestamp: DateTime<Utc>,
        tx_id: &str,
    ) -> IndexResult<ItemRecord> {
        let write_txn = self.db.begin_write()?;
        let record = {
            let mut items = write_txn.open_table(ITEMS)?;
            let mut log = write_txn.open_table(TRANSFER_LOG)?;
            let mut idx = write_txn.open_table(ITEM_TRANSFER_INDEX)?;

            let existing_bytes = {
                let existing = items.get(item_id)?.ok_or(IndexError::MissingItem(item_id))?;
                existing.value().to_vec()
            };
            let mut item: ItemRecord = serde_json::from_slice(&existing_bytes)?;

            if log.get(tx_id)?.is_some() {
                item
            } else {
                let elapsed_ms = (timestamp - item.creation_date).num_milliseconds();
                item.holdtime_avg_ms = Some(if item.transfers > 0 {
                    elapsed_ms / item.transfers as i64
                } else {
                    elapsed_ms
                });
                item.transfers += 1;
                // An ownership change resolves any standing missing report.
                item.missing_status = false;
                item.report_to = None;

                let json = serde_json::to_vec(&item)?;
                items.insert(item_id, json.as_slice())?;

                let transfer = TransferRecord {
                    tx_id: tx_id.to_string(),
                    item_id,
                    date: timestamp,
                    to_address: to_address.to_string(),
                    from_address: from_address.to_string(),
                };
                let transfer_json = serde_json::to_vec(&transfer)?;
                log.insert(tx_id, transfer_json.as_slice())?;

                let key = make_transfer_key(item_id, timestamp.timestamp(), tx_id);
                idx.insert(key.as_slice(), ())?;

                item
            }
        };
        write_txn.commit()?;
        Ok(record)
    }

    /// Mark an item as reported missing, with an optional contact channel.
    pub fn set_missing(&self, id: u64, report_to: Option<&str>) -> IndexResult<ItemRecord> {
        self.update_item(id, |item| {
            item.missing_status = true;
            item.report_to = report_to.map(str::to_string);
        })
    }

    /// Clear a missing-item report.
    pub fn clear_missing(&self, id: u64) -> IndexResult<ItemRecord> {
        self.update_item(id, |item| {
            item.missing_status = false;
            item.report_to = None;
        })
    }

    fn update_item(
        &self,
        id: u64,
        mutate: impl FnOnce(&mut ItemRecord),
    ) -> IndexResult<ItemRecord> {
        let write_txn = self.db.begin_write()?;
        let record = {
            let mut table = write_txn.open_table(ITEMS)?;
            let existing_bytes = {
                let existing = table.get(id)?.ok_or(IndexError::MissingItem(id))?;
                existing.value().to_vec()
            };
            let mut item: ItemRecord = serde_json::from_slice(&existing_bytes)?;
            mutate(&mut item);
            let json = serde_json::to_vec(&item)?;
            table.insert(id, json.as_slice())?;
            item
        };
        write_txn.commit()?;
        Ok(record)
    }

    // =========================================================================
    // Transfer log
    // =========================================================================

    /// Look up a single transfer by transaction id.
    pub fn get_transfer(&self, tx_id: &str) -> IndexResult<Option<TransferRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TRANSFER_LOG)?;
        match table.get(tx_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Newest-first listing of transfers for an item.
    pub fn list_transfers(&self, item_id: u64, limit: usize) -> IndexResult<Vec<TransferRecord>> {
        let read_txn = self.db.begin_read()?;
        let idx = read_txn.open_table(ITEM_TRANSFER_INDEX)?;
        let log = read_txn.open_table(TRANSFER_LOG)?;

        let prefix = make_transfer_prefix(item_id);
        let prefix_end = make_transfer_prefix_end(item_id);

        let mut results = Vec::new();
        for entry in idx.range(prefix.as_slice()..prefix_end.as_slice())? {
            let entry = entry?;
            let key_bytes = entry.0.value().to_vec();
            if let Some(tx_id) = extract_tx_id_from_key(&key_bytes) {
                if let Some(value) = log.get(tx_id.as_str())? {
                    results.push(serde_json::from_slice(value.value())?);
                }
            }
            if results.len() >= limit {
                break;
            }
        }
        Ok(results)
    }

    // =========================================================================
    // Operators & accounts
    // =========================================================================

    /// Record a brand deployment: account `id` operates `contract_address`.
    ///
    /// The contract address is unique across operators.
    pub fn create_operator(&self, id: &str, contract_address: &str) -> IndexResult<()> {
        let addr = contract_address.to_lowercase();
        let write_txn = self.db.begin_write()?;
        {
            let mut operators = write_txn.open_table(OPERATORS)?;
            let mut contracts = write_txn.open_table(OPERATOR_CONTRACTS)?;
            if operators.get(id)?.is_some() {
                return Err(IndexError::AlreadyExists(format!("operator {id}")));
            }
            if contracts.get(addr.as_str())?.is_some() {
                return Err(IndexError::AlreadyExists(format!("operator contract {addr}")));
            }
            operators.insert(id, addr.as_str())?;
            contracts.insert(addr.as_str(), id)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Look up an operator record by account id.
    pub fn get_operator(&self, id: &str) -> IndexResult<Option<OperatorRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(OPERATORS)?;
        match table.get(id)? {
            Some(value) => Ok(Some(OperatorRecord {
                id: id.to_string(),
                contract_address: value.value().to_string(),
            })),
            None => Ok(None),
        }
    }

    /// Which account operates a given contract address, if any.
    pub fn operator_for_contract(&self, contract_address: &str) -> IndexResult<Option<String>> {
        let addr = contract_address.to_lowercase();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(OPERATOR_CONTRACTS)?;
        match table.get(addr.as_str())? {
            Some(value) => Ok(Some(value.value().to_string())),
            None => Ok(None),
        }
    }

    /// Register an on-chain address as belonging to an account.
    pub fn register_account(&self, address: &str, account_id: &str) -> IndexResult<()> {
        let addr = address.to_lowercase();
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ACCOUNTS)?;
            table.insert(addr.as_str(), account_id)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Look up which account owns a given on-chain address.
    pub fn account_for_address(&self, address: &str) -> IndexResult<Option<String>> {
        let addr = address.to_lowercase();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        match table.get(addr.as_str())? {
            Some(value) => Ok(Some(value.value().to_string())),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Poller checkpoint & dedup
    // =========================================================================

    /// Last processed block for an event kind, if any cycle has completed.
    pub fn cursor(&self, kind: &str) -> IndexResult<Option<u64>> {
        let key = format!("cursor_{kind}");
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POLLER_STATE)?;
        match table.get(key.as_str())? {
            Some(value) => {
                let bytes = value.value();
                if bytes.len() >= 8 {
                    Ok(Some(u64::from_be_bytes(bytes[..8].try_into().unwrap())))
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    /// Persist the last processed block for an event kind.
    pub fn set_cursor(&self, kind: &str, block: u64) -> IndexResult<()> {
        let key = format!("cursor_{kind}");
        let bytes = block.to_be_bytes();
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(POLLER_STATE)?;
            table.insert(key.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Whether an event uid has already been applied.
    pub fn is_seen(&self, uid: &str) -> IndexResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEEN_EVENTS)?;
        Ok(table.get(uid)?.is_some())
    }

    /// Mark an event uid as applied.
    pub fn mark_seen(&self, uid: &str) -> IndexResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SEEN_EVENTS)?;
            table.insert(uid, ())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn temp_store() -> (IndexStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::open(&dir.path().join("test.redb")).unwrap();
        (store, dir)
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn mint_then_query() {
        let (store, _dir) = temp_store();
        let t0 = ts(0);
        store.create_item(42, t0).unwrap();

        let item = store.get_item(42).unwrap().unwrap();
        assert_eq!(item.transfers, 0);
        assert_eq!(item.creation_date, t0);
        assert!(!item.missing_status);
        assert!(item.holdtime_avg().is_none());
    }

    #[test]
    fn duplicate_mint_is_rejected_and_preserves_row() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();
        store
            .record_transfer(42, "0xaa", "0xbb", ts(60), "0xt1")
            .unwrap();

        let result = store.create_item(42, ts(120));
        assert!(matches!(result, Err(IndexError::AlreadyExists(_))));
        assert_eq!(store.get_item(42).unwrap().unwrap().transfers, 1);
    }

    #[test]
    fn first_transfer_takes_full_elapsed_time() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();

        let item = store
            .record_transfer(42, "0xaa", "0xbb", ts(90), "0xt1")
            .unwrap();
        assert_eq!(item.transfers, 1);
        assert_eq!(item.holdtime_avg(), Some(TimeDelta::seconds(90)));
    }

    #[test]
    fn second_transfer_divides_by_prior_count() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();
        store
            .record_transfer(42, "0xaa", "0xbb", ts(90), "0xt1")
            .unwrap();

        // Count is 1 before the update: average = (t2 - t0) / 1.
        let item = store
            .record_transfer(42, "0xcc", "0xaa", ts(300), "0xt2")
            .unwrap();
        assert_eq!(item.transfers, 2);
        assert_eq!(item.holdtime_avg(), Some(TimeDelta::seconds(300)));
    }

    #[test]
    fn third_transfer_halves_total_elapsed() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();
        store
            .record_transfer(42, "0xaa", "0xbb", ts(90), "0xt1")
            .unwrap();
        store
            .record_transfer(42, "0xcc", "0xaa", ts(300), "0xt2")
            .unwrap();

        let item = store
            .record_transfer(42, "0xdd", "0xcc", ts(1000), "0xt3")
            .unwrap();
        assert_eq!(item.transfers, 3);
        assert_eq!(item.holdtime_avg(), Some(TimeDelta::seconds(500)));
    }

    #[test]
    fn transfer_clears_missing_report() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();
        store.set_missing(42, Some("owner@example.com")).unwrap();

        let flagged = store.get_item(42).unwrap().unwrap();
        assert!(flagged.missing_status);
        assert_eq!(flagged.report_to.as_deref(), Some("owner@example.com"));

        let item = store
            .record_transfer(42, "0xaa", "0xbb", ts(60), "0xt1")
            .unwrap();
        assert!(!item.missing_status);
        assert!(item.report_to.is_none());
    }

    #[test]
    fn transfer_for_unknown_item_is_reported() {
        let (store, _dir) = temp_store();
        let result = store.record_transfer(9, "0xaa", "0xbb", ts(0), "0xt1");
        assert!(matches!(result, Err(IndexError::MissingItem(9))));
    }

    #[test]
    fn replayed_transfer_does_not_double_count() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();
        store
            .record_transfer(42, "0xaa", "0xbb", ts(90), "0xt1")
            .unwrap();

        let item = store
            .record_transfer(42, "0xaa", "0xbb", ts(90), "0xt1")
            .unwrap();
        assert_eq!(item.transfers, 1);
        assert_eq!(store.list_transfers(42, 10).unwrap().len(), 1);
    }

    #[test]
    fn burn_removes_row() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();

        assert!(store.delete_item(42).unwrap());
        assert!(store.get_item(42).unwrap().is_none());
        // Second burn is a no-op.
        assert!(!store.delete_item(42).unwrap());
    }

    #[test]
    fn transfer_log_lists_newest_first() {
        let (store, _dir) = temp_store();
        store.create_item(42, ts(0)).unwrap();
        store
            .record_transfer(42, "0xaa", "0xbb", ts(60), "0xt1")
            .unwrap();
        store
            .record_transfer(42, "0xcc", "0xaa", ts(120), "0xt2")
            .unwrap();
        store
            .record_transfer(42, "0xdd", "0xcc", ts(180), "0xt3")
            .unwrap();

        let transfers = store.list_transfers(42, 2).unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].tx_id, "0xt3");
        assert_eq!(transfers[1].tx_id, "0xt2");

        let single = store.get_transfer("0xt1").unwrap().unwrap();
        assert_eq!(single.item_id, 42);
        assert_eq!(single.to_address, "0xaa");
    }

    #[test]
    fn transfers_of_other_items_are_not_listed() {
        let (store, _dir) = temp_store();
        store.create_item(1, ts(0)).unwrap();
        store.create_item(2, ts(0)).unwrap();
        store
            .record_transfer(1, "0xaa", "0xbb", ts(60), "0xt1")
            .unwrap();
        store
            .record_transfer(2, "0xcc", "0xdd", ts(60), "0xt2")
            .unwrap();

        let transfers = store.list_transfers(1, 10).unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].tx_id, "0xt1");
    }

    #[test]
    fn operator_round_trip() {
        let (store, _dir) = temp_store();
        store
            .create_operator("acct-1", "0xAbCd00000000000000000000000000000000Ef12")
            .unwrap();

        let operator = store.get_operator("acct-1").unwrap().unwrap();
        assert_eq!(
            operator.contract_address,
            "0xabcd00000000000000000000000000000000ef12"
        );
        assert_eq!(
            store
                .operator_for_contract("0xABCD00000000000000000000000000000000EF12")
                .unwrap(),
            Some("acct-1".to_string())
        );
    }

    #[test]
    fn operator_contract_is_unique() {
        let (store, _dir) = temp_store();
        store.create_operator("acct-1", "0xaaaa").unwrap();

        let dup_contract = store.create_operator("acct-2", "0xAAAA");
        assert!(matches!(dup_contract, Err(IndexError::AlreadyExists(_))));

        let dup_id = store.create_operator("acct-1", "0xbbbb");
        assert!(matches!(dup_id, Err(IndexError::AlreadyExists(_))));
    }

    #[test]
    fn account_registry_is_case_insensitive() {
        let (store, _dir) = temp_store();
        let addr = "0xABCD1234567890ABCDEF1234567890ABCDEF1234";
        store.register_account(addr, "acct-42").unwrap();

        assert_eq!(
            store.account_for_address(&addr.to_lowercase()).unwrap(),
            Some("acct-42".to_string())
        );
        assert_eq!(store.account_for_address("0xother").unwrap(), None);
    }

    #[test]
    fn cursor_round_trip() {
        let (store, _dir) = temp_store();
        assert_eq!(store.cursor("mint").unwrap(), None);

        store.set_cursor("mint", 99_999).unwrap();
        assert_eq!(store.cursor("mint").unwrap(), Some(99_999));
        // Kinds are independent.
        assert_eq!(store.cursor("burn").unwrap(), None);
    }

    #[test]
    fn seen_events_round_trip() {
        let (store, _dir) = temp_store();
        assert!(!store.is_seen("0xabc:0").unwrap());
        store.mark_seen("0xabc:0").unwrap();
        assert!(store.is_seen("0xabc:0").unwrap());
    }
}
