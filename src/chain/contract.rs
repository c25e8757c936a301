// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Item-token contract bindings.
//!
//! The `sol!` interfaces cover the lifecycle events the poller subscribes
//! to and the contract functions the surrounding application submits.
//! State-changing calls go through the calldata builders here and are
//! signed/submitted by the transaction pipeline; view calls go through
//! [`ItemContract`].

use std::str::FromStr;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::providers::Provider;
use alloy::sol;
use alloy::sol_types::SolCall;

use super::ChainClientError;

sol! {
    #[sol(rpc)]
    interface IItemToken {
        event Mint(uint256 indexed itemid);
        event Burn(uint256 indexed itemid);
        event ItemTransfer(uint256 indexed itemid, address to, address from);
        event Deploy(address operator, address contadr);

        function tokenURI(uint256 itemid) external view returns (string);
        function ownerOf(uint256 itemid) external view returns (address);
        function mintItemToken(string uri) external;
        function transferItemToken(uint256 itemid, address to) external;
        function burnItemToken(uint256 itemid) external;
        function setItemClaimability(uint256 itemid) external;
        function viewItemClaimability(uint256 itemid) external view returns (bool);
        function claimItemToken(uint256 itemid) external;
        function grantRole(bytes32 role, address account) external;
        function hasRole(bytes32 role, address account) external view returns (bool);
    }

    #[sol(rpc)]
    interface IProxyDispatcher {
        function execute(address target, bytes data) external;
    }
}

/// Role identifier required for operator-only contract functions.
pub fn operator_role() -> B256 {
    keccak256("OPERATOR_ROLE")
}

// =============================================================================
// Calldata builders
// =============================================================================

/// `mintItemToken(uri)`
pub fn mint_item_token(uri: &str) -> Bytes {
    IItemToken::mintItemTokenCall { uri: uri.to_string() }.abi_encode().into()
}

/// `transferItemToken(itemid, to)`
pub fn transfer_item_token(item_id: u64, to: Address) -> Bytes {
    IItemToken::transferItemTokenCall { itemid: U256::from(item_id), to }
        .abi_encode()
        .into()
}

/// `burnItemToken(itemid)`
pub fn burn_item_token(item_id: u64) -> Bytes {
    IItemToken::burnItemTokenCall { itemid: U256::from(item_id) }.abi_encode().into()
}

/// `setItemClaimability(itemid)`
pub fn set_item_claimability(item_id: u64) -> Bytes {
    IItemToken::setItemClaimabilityCall { itemid: U256::from(item_id) }
        .abi_encode()
        .into()
}

/// `claimItemToken(itemid)`
pub fn claim_item_token(item_id: u64) -> Bytes {
    IItemToken::claimItemTokenCall { itemid: U256::from(item_id) }.abi_encode().into()
}

/// `grantRole(role, account)`
pub fn grant_role(role: B256, account: Address) -> Bytes {
    IItemToken::grantRoleCall { role, account }.abi_encode().into()
}

/// Wrap calldata in the proxy dispatcher's `execute(target, data)`.
pub fn proxy_execute(target: Address, data: Bytes) -> Bytes {
    IProxyDispatcher::executeCall { target, data }.abi_encode().into()
}

// =============================================================================
// View calls
// =============================================================================

/// Item-token contract wrapper for read-only calls.
pub struct ItemContract<P> {
    contract: IItemToken::IItemTokenInstance<P>,
}

impl<P: Provider + Clone> ItemContract<P> {
    /// Create a new contract instance.
    pub fn new(provider: &P, contract_address: &str) -> Result<Self, ChainClientError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| ChainClientError::Contract(e.to_string()))?;
        Ok(Self {
            contract: IItemToken::new(address, provider.clone()),
        })
    }

    /// Create a contract instance for an already-parsed address.
    pub fn at(provider: &P, address: Address) -> Self {
        Self {
            contract: IItemToken::new(address, provider.clone()),
        }
    }

    /// Get the metadata URI of a token.
    pub async fn token_uri(&self, item_id: u64) -> Result<String, ChainClientError> {
        self.contract
            .tokenURI(U256::from(item_id))
            .call()
            .await
            .map_err(|e| ChainClientError::Contract(e.to_string()))
    }

    /// Get the current owner of a token.
    pub async fn owner_of(&self, item_id: u64) -> Result<Address, ChainClientError> {
        self.contract
            .ownerOf(U256::from(item_id))
            .call()
            .await
            .map_err(|e| ChainClientError::Contract(e.to_string()))
    }

    /// Whether a token is currently claimable.
    pub async fn view_item_claimability(&self, item_id: u64) -> Result<bool, ChainClientError> {
        self.contract
            .viewItemClaimability(U256::from(item_id))
            .call()
            .await
            .map_err(|e| ChainClientError::Contract(e.to_string()))
    }

    /// Whether an address holds a role.
    pub async fn has_role(&self, role: B256, account: Address) -> Result<bool, ChainClientError> {
        self.contract
            .hasRole(role, account)
            .call()
            .await
            .map_err(|e| ChainClientError::Contract(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolEvent;

    #[test]
    fn event_signatures_are_distinct() {
        let topics = [
            IItemToken::Mint::SIGNATURE_HASH,
            IItemToken::Burn::SIGNATURE_HASH,
            IItemToken::ItemTransfer::SIGNATURE_HASH,
            IItemToken::Deploy::SIGNATURE_HASH,
        ];
        for (i, a) in topics.iter().enumerate() {
            for b in &topics[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn calldata_starts_with_selector() {
        let data = transfer_item_token(42, Address::ZERO);
        assert_eq!(&data[..4], IItemToken::transferItemTokenCall::SELECTOR);
        // selector + two 32-byte words
        assert_eq!(data.len(), 4 + 64);
    }

    #[test]
    fn proxy_execute_wraps_inner_calldata() {
        let inner = burn_item_token(7);
        let wrapped = proxy_execute(Address::ZERO, inner.clone());
        assert_eq!(&wrapped[..4], IProxyDispatcher::executeCall::SELECTOR);
        let decoded = IProxyDispatcher::executeCall::abi_decode(&wrapped).unwrap();
        assert_eq!(decoded.target, Address::ZERO);
        assert_eq!(decoded.data, inner);
    }

    #[test]
    fn operator_role_is_stable() {
        assert_eq!(operator_role(), keccak256("OPERATOR_ROLE"));
    }
}
