// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process, sync::Arc, time::Duration};

use axum_server::Handle;
use tracing::{error, info};

use eduverse_server::{
    api::router,
    blockchain::{Credential, SuiClient},
    config::Config,
    logging,
    state::AppState,
};

/// Time in-flight requests get to finish after Ctrl-C.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    logging::init();

    // Nothing is bound until configuration and the signing key are valid.
    let config = Config::from_env().unwrap_or_else(|e| fatal("Invalid configuration", e));
    let credential = Credential::from_base64(&config.private_key)
        .unwrap_or_else(|e| fatal("Invalid PRIVATE_KEY", e));
    let client = SuiClient::new(config.network, config.rpc_url.as_deref(), config.gas_budget)
        .unwrap_or_else(|e| fatal("Failed to create Sui client", e));

    info!(
        network = client.network().name,
        rpc_url = %client.rpc_url(),
        sender = %credential.address(),
        package = %config.addresses.package_id,
        database = %config.addresses.database_id,
        gas_budget = config.gas_budget,
        "Sui client ready"
    );

    let state = AppState::new(Arc::new(client), Arc::new(credential), config.addresses);
    let app = router(state);

    let addr = config.bind_addr();

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
    });

    info!(address = %addr, "Eduverse server listening (docs at /docs)");

    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        fatal("HTTP server failed", e);
    }

    info!("HTTP server stopped");
}

fn fatal<E: std::fmt::Display>(context: &str, err: E) -> ! {
    error!(error = %err, "{context}");
    process::exit(1);
}
