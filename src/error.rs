// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Domain error taxonomy.
//!
//! These errors are raised synchronously at the point of detection and are
//! expected to cross into the calling layer unmodified. The calling layer
//! owns user-facing presentation; nothing in the core suppresses or retries
//! them.

/// Domain-level failure of an item-token operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The supplied passphrase or encrypted key did not yield a usable
    /// account key. Covers wrong passphrases, malformed ciphertext, and
    /// decrypted material that fails to parse as a key.
    #[error("Incorrect private key")]
    PrivateKey,

    /// The caller is not the token's on-chain owner.
    #[error("Caller is not owner")]
    Ownership,

    /// The operation targeted an unminted or burned token id.
    #[error("Nonexistent item token")]
    NonExistentToken,

    /// The caller lacks the required on-chain role.
    #[error("Caller is not an operator")]
    NotOperator,

    /// A claim was attempted on a token that is not claimable.
    #[error("Item token is not claimable")]
    NotClaimable,

    /// An index lookup missed for a referenced account address.
    #[error("No account known for address {0}")]
    UnknownAccount(String),

    /// The ledger rejected the call with a reason no table entry matches.
    /// Carries the revert reason verbatim.
    #[error("On-chain revert: {0}")]
    OnChain(String),
}
