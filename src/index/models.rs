// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Records persisted in the index database.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A tracked item token, mirrored from on-chain lifecycle events.
///
/// Created on Mint, mutated on Transfer, deleted on Burn. `transfers` is
/// monotonically non-decreasing while the row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// On-chain token id.
    pub id: u64,
    /// Number of processed transfers.
    pub transfers: u64,
    /// Average hold time in whole milliseconds; unset until the first
    /// transfer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holdtime_avg_ms: Option<i64>,
    /// When the item was minted (index processing time of the Mint event).
    pub creation_date: DateTime<Utc>,
    /// Whether the item is currently reported missing.
    pub missing_status: bool,
    /// Contact channel for a standing missing-item report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_to: Option<String>,
}

impl ItemRecord {
    /// Fresh record for a newly minted item.
    pub fn new(id: u64, creation_date: DateTime<Utc>) -> Self {
        Self {
            id,
            transfers: 0,
            holdtime_avg_ms: None,
            creation_date,
            missing_status: false,
            report_to: None,
        }
    }

    /// Average hold time as a duration, if any transfer has been processed.
    pub fn holdtime_avg(&self) -> Option<TimeDelta> {
        self.holdtime_avg_ms.map(TimeDelta::milliseconds)
    }
}

/// Immutable audit record of one processed transfer event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// On-chain transaction id (unique).
    pub tx_id: String,
    /// Token the transfer applied to.
    pub item_id: u64,
    /// When the transfer was indexed.
    pub date: DateTime<Utc>,
    /// Receiving address.
    pub to_address: String,
    /// Sending address.
    pub from_address: String,
}

/// Links an index account to the on-chain contract it operates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRecord {
    /// Account id of the operator.
    pub id: String,
    /// Contract address the operator was deployed for.
    pub contract_address: String,
}
