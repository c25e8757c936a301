// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! LRU cache for hot item lookups.
//!
//! Caches item records by token id to avoid repeated redb reads for the
//! most common query pattern. Entries are invalidated by the poller on
//! every event-derived mutation, so no TTL is needed.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use super::models::ItemRecord;

/// In-process LRU cache keyed by item id.
pub struct ItemCache {
    cache: Mutex<LruCache<u64, ItemRecord>>,
}

impl ItemCache {
    /// Create a new cache holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            )),
        }
    }

    /// Get the cached record for an item id.
    pub fn get(&self, id: u64) -> Option<ItemRecord> {
        let mut cache = self.cache.lock().ok()?;
        cache.get(&id).cloned()
    }

    /// Store a record for an item id.
    pub fn put(&self, record: ItemRecord) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(record.id, record);
        }
    }

    /// Drop the cached record for an item id.
    pub fn invalidate(&self, id: u64) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.pop(&id);
        }
    }
}
