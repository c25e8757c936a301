// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Provenance Server - Authenticity Token Indexing & Signing Service
//!
//! This crate keeps an embedded off-chain index consistent with the item
//! token contract's lifecycle events and signs/submits on-chain
//! transactions with passphrase-encrypted account keys.
//!
//! ## Modules
//!
//! - `chain` - Ledger access: client port, contract bindings, transaction
//!   pipeline, revert translation
//! - `index` - Embedded redb index (items, transfer log, operators)
//! - `poller` - Chain-to-index reconciliation task
//! - `vault` - Passphrase encryption of account keys

pub mod chain;
pub mod config;
pub mod error;
pub mod index;
pub mod poller;
pub mod vault;
