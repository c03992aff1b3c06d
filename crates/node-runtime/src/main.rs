//! # PhotoChain Node
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `PC_*` environment variables
//! 2. Install tracing
//! 3. Lock the data directory, open and audit the chain, replay the projection
//! 4. Serve the HTTP API until Ctrl+C
//!
//! ```text
//! HTTP ──→ pc-03 gateway ──→ pc-02 ledger ──→ chain.jsonl
//!                │                 │
//!                │                 └──→ pc-01 projection (users, images, feeds)
//!                └──→ uploads/ (blob store, scorer input, /files)
//! ```

use anyhow::{Context, Result};
use tracing::{error, info};

use node_runtime::{init_tracing, NodeConfig, SubsystemContainer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!("===========================================");
    info!("  PhotoChain Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let container = SubsystemContainer::new(config)?;
    let gateway = container.gateway()?;

    info!("Data Dir: {:?}", container.config.storage.data_dir);
    info!("Upload Dir: {:?}", container.config.gateway.uploads.dir);
    info!("HTTP: {}", container.config.gateway.http_addr());

    if let Err(e) = gateway.serve(shutdown_signal()).await {
        error!("[node] HTTP server failed: {}", e);
        return Err(e.into());
    }

    info!("[node] Shutdown complete ({} blocks)", container.ledger.len());
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("[node] 🛑 Received Ctrl+C, shutting down"),
        Err(e) => error!("[node] failed to listen for Ctrl+C: {}", e),
    }
}
