//! HTTP handlers, one module per resource.

pub mod chain;
pub mod feed;
pub mod health;
pub mod media;
pub mod transact;

use pc_02_chain_ledger::Ledger;
use std::sync::Arc;

use crate::ports::BlobStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub blobs: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(ledger: Arc<Ledger>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { ledger, blobs }
    }
}
