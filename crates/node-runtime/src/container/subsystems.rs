use anyhow::{Context, Result};
use pc_02_chain_ledger::{DataDirLock, FileLedgerStore, HistogramScorer, Ledger, SystemTimeSource};
use pc_03_api_gateway::{ApiGatewayService, FsBlobStore};
use std::sync::Arc;
use tracing::info;

use super::config::NodeConfig;

/// The opened ledger and its collaborators.
pub struct SubsystemContainer {
    pub config: NodeConfig,
    pub ledger: Arc<Ledger>,
    pub blobs: Arc<FsBlobStore>,
    // Held for the container's lifetime
    _lock: DataDirLock,
}

impl SubsystemContainer {
    /// Validate the configuration and open everything.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("invalid node configuration")?;

        let data_dir = config.storage.data_dir.clone();
        let lock = DataDirLock::acquire(&data_dir)
            .with_context(|| format!("failed to lock data directory {}", data_dir.display()))?;

        let store = FileLedgerStore::open(&data_dir)
            .with_context(|| format!("failed to open chain store in {}", data_dir.display()))?;

        let upload_dir = config.gateway.uploads.dir.clone();
        std::fs::create_dir_all(&upload_dir)
            .with_context(|| format!("failed to create upload directory {}", upload_dir.display()))?;
        let scorer = HistogramScorer::new(&upload_dir, config.scoring);

        let ledger = Ledger::open(store, scorer, SystemTimeSource).context("failed to open ledger")?;
        info!(
            blocks = ledger.len(),
            enforce_scores = config.scoring.enforce,
            "[node] 📦 Ledger ready in {}",
            data_dir.display()
        );

        Ok(Self {
            blobs: Arc::new(FsBlobStore::new(upload_dir)),
            ledger: Arc::new(ledger),
            config,
            _lock: lock,
        })
    }

    /// HTTP service over this container's ledger and blob store.
    pub fn gateway(&self) -> Result<ApiGatewayService> {
        let service = ApiGatewayService::new(
            self.config.gateway.clone(),
            Arc::clone(&self.ledger),
            self.blobs.clone(),
        )?;
        Ok(service)
    }
}
