use crate::ports::outbound::LedgerStore;
use parking_lot::Mutex;
use shared_types::{Block, StorageError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory block store for tests and ephemeral nodes.
///
/// Clones share the same backing vector, so a test can keep a handle after
/// moving the store into a `Ledger`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    blocks: Arc<Mutex<Vec<Block>>>,
    fail_appends: Arc<AtomicBool>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, e.g. with a tampered chain.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: Arc::new(Mutex::new(blocks)),
            fail_appends: Arc::default(),
        }
    }

    /// Snapshot of the persisted blocks.
    pub fn blocks(&self) -> Vec<Block> {
        self.blocks.lock().clone()
    }

    /// Make subsequent appends fail with an I/O error.
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self) -> Result<Vec<Block>, StorageError> {
        Ok(self.blocks())
    }

    fn append(&mut self, block: &Block) -> Result<(), StorageError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StorageError::Io("simulated append failure".into()));
        }
        self.blocks.lock().push(block.clone());
        Ok(())
    }
}
