// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

use std::env;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use provenance_server::chain::RpcChainClient;
use provenance_server::config::Config;
use provenance_server::index::{IndexStore, ItemCache};
use provenance_server::poller::EventLogPoller;

/// Items held in the in-process read cache.
const ITEM_CACHE_CAPACITY: usize = 1024;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = Arc::new(
        IndexStore::open(&config.data_dir.join("index.redb"))
            .expect("failed to open index database"),
    );
    let cache = Arc::new(ItemCache::new(ITEM_CACHE_CAPACITY));
    let client = Arc::new(
        RpcChainClient::new(&config.rpc_url, config.contract_address)
            .expect("failed to create ledger client"),
    );

    let shutdown = CancellationToken::new();
    let poller = EventLogPoller::new(client, store, cache)
        .with_poll_interval(config.poll_interval)
        .with_chunk_size(config.chunk_size);
    let poller_handle = tokio::spawn(poller.run(shutdown.clone()));

    tracing::info!(
        rpc_url = %config.rpc_url,
        contract = %config.contract_address,
        "provenance server running"
    );

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
    tracing::info!("shutdown signal received");

    shutdown.cancel();
    let _ = poller_handle.await;
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
