// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Alloy-backed HTTP ledger client.

use alloy::network::Ethereum;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use alloy::sol_types::SolEvent;
use async_trait::async_trait;

use super::contract::{IItemToken, ItemContract};
use super::{ChainClient, ChainClientError, EventEntry, EventKind, EventPayload};

/// HTTP provider type (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Ledger client over JSON-RPC HTTP.
pub struct RpcChainClient {
    /// Item-token contract the event subscriptions watch.
    contract_address: Address,
    /// Alloy HTTP provider
    provider: HttpProvider,
}

impl RpcChainClient {
    /// Create a new client for the given RPC endpoint and contract.
    pub fn new(rpc_url: &str, contract_address: Address) -> Result<Self, ChainClientError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainClientError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self {
            contract_address,
            provider,
        })
    }

    /// Contract wrapper for read-only calls against the watched contract.
    pub fn item_contract(&self) -> ItemContract<HttpProvider> {
        ItemContract::at(&self.provider, self.contract_address)
    }

    /// Topic hash for an event kind.
    fn signature_hash(kind: EventKind) -> B256 {
        match kind {
            EventKind::Mint => IItemToken::Mint::SIGNATURE_HASH,
            EventKind::Burn => IItemToken::Burn::SIGNATURE_HASH,
            EventKind::Transfer => IItemToken::ItemTransfer::SIGNATURE_HASH,
            EventKind::Deploy => IItemToken::Deploy::SIGNATURE_HASH,
        }
    }

    /// Decode one raw log into an event entry.
    fn decode_log(kind: EventKind, log: &Log) -> Option<EventEntry> {
        // Pending logs carry no position; they are refetched once mined.
        let block_number = log.block_number?;
        let tx_hash = log.transaction_hash?;
        let log_index = log.log_index?;

        let payload = match kind {
            EventKind::Mint => {
                let event = IItemToken::Mint::decode_log_data(log.data()).ok()?;
                EventPayload::Mint {
                    item_id: item_id_from_u256(event.itemid)?,
                }
            }
            EventKind::Burn => {
                let event = IItemToken::Burn::decode_log_data(log.data()).ok()?;
                EventPayload::Burn {
                    item_id: item_id_from_u256(event.itemid)?,
                }
            }
            EventKind::Transfer => {
                let event = IItemToken::ItemTransfer::decode_log_data(log.data()).ok()?;
                EventPayload::Transfer {
                    item_id: item_id_from_u256(event.itemid)?,
                    to: event.to,
                    from: event.from,
                }
            }
            EventKind::Deploy => {
                let event = IItemToken::Deploy::decode_log_data(log.data()).ok()?;
                EventPayload::Deploy {
                    operator: event.operator,
                    contract: event.contadr,
                }
            }
        };

        Some(EventEntry {
            payload,
            block_number,
            tx_hash,
            log_index,
        })
    }
}

fn item_id_from_u256(raw: U256) -> Option<u64> {
    u64::try_from(raw).ok()
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn block_number(&self) -> Result<u64, ChainClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ChainClientError::Rpc(e.to_string()))
    }

    async fn fetch_events(
        &self,
        kind: EventKind,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<EventEntry>, ChainClientError> {
        let filter = Filter::new()
            .address(self.contract_address)
            .event_signature(Self::signature_hash(kind))
            .from_block(from_block)
            .to_block(to_block);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| ChainClientError::Rpc(e.to_string()))?;

        let mut entries = Vec::with_capacity(logs.len());
        for log in &logs {
            match Self::decode_log(kind, log) {
                Some(entry) => entries.push(entry),
                None => {
                    tracing::warn!(
                        kind = kind.as_str(),
                        tx_hash = ?log.transaction_hash,
                        "skipping undecodable event log"
                    );
                }
            }
        }
        Ok(entries)
    }

    async fn gas_price(&self) -> Result<u128, ChainClientError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ChainClientError::Rpc(e.to_string()))
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, ChainClientError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(|e| ChainClientError::Rpc(e.to_string()))
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainClientError> {
        self.provider
            .estimate_gas(tx.clone())
            .await
            .map_err(|e| classify_send_error(e.to_string()))
    }

    async fn chain_id(&self) -> Result<u64, ChainClientError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ChainClientError::Rpc(e.to_string()))
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, ChainClientError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| classify_send_error(e.to_string()))?;
        Ok(*pending.tx_hash())
    }
}

/// Split contract rejections (revert reasons) from transport failures.
fn classify_send_error(message: String) -> ChainClientError {
    if message.contains("revert") {
        ChainClientError::Rejected(message)
    } else {
        ChainClientError::Rpc(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_messages_are_classified_as_rejections() {
        let rejected =
            classify_send_error("execution reverted: Caller is not token owner".to_string());
        assert!(matches!(rejected, ChainClientError::Rejected(_)));

        let transport = classify_send_error("connection refused".to_string());
        assert!(matches!(transport, ChainClientError::Rpc(_)));
    }

    #[test]
    fn oversized_item_ids_are_rejected() {
        assert_eq!(item_id_from_u256(U256::from(42u64)), Some(42));
        assert_eq!(item_id_from_u256(U256::MAX), None);
    }

    #[test]
    fn invalid_rpc_url_is_rejected() {
        let result = RpcChainClient::new("not a url", Address::ZERO);
        assert!(matches!(result, Err(ChainClientError::InvalidRpcUrl(_))));
    }
}
