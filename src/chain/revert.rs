// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Revert-reason translation.
//!
//! Maps the human-readable reason a ledger returns on contract rejection to
//! the domain error taxonomy. Matching is plain substring containment
//! against a fixed table, so the RPC client's `execution reverted: `
//! prefixes do not matter.

use crate::error::DomainError;

/// Translate an on-chain revert reason into a domain error.
///
/// Reasons matching no table entry become [`DomainError::OnChain`] with the
/// reason carried verbatim.
pub fn translate(revert_reason: &str) -> DomainError {
    if revert_reason.contains("Caller is not token owner") {
        DomainError::Ownership
    } else if revert_reason.contains("owner query for nonexistent token") {
        DomainError::NonExistentToken
    } else if revert_reason.contains("URI query for nonexistent token") {
        DomainError::NonExistentToken
    } else if revert_reason.contains("is missing role") {
        DomainError::NotOperator
    } else if revert_reason.contains("is not claimable") {
        DomainError::NotClaimable
    } else {
        DomainError::OnChain(revert_reason.to_string())
    }
}
