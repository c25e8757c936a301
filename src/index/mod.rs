// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! # Off-Chain Index
//!
//! Embedded redb database mirroring derived on-chain state (items, transfer
//! audit log, operators, account registry) plus the poller's durable cursor
//! and applied-event set. Serves low-latency reads without per-request
//! chain calls; an LRU cache fronts the hottest item lookups.

pub mod cache;
pub mod models;
pub mod store;

pub use cache::ItemCache;
pub use models::{ItemRecord, OperatorRecord, TransferRecord};
pub use store::{IndexError, IndexResult, IndexStore};
