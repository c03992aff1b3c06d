//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the ledger requires the host application to provide.

use shared_types::{AuthenticityScore, Block, ScoringError, StorageError, Timestamp, Transaction};

/// Durable block storage.
///
/// Production: `FileLedgerStore` (append-only JSON lines)
/// Testing: `InMemoryLedgerStore`
pub trait LedgerStore: Send + Sync {
    /// Load every persisted block, oldest first.
    fn load(&self) -> Result<Vec<Block>, StorageError>;

    /// Durably append one block.
    ///
    /// ## Atomicity
    ///
    /// On error the store must be left as it was before the call.
    fn append(&mut self, block: &Block) -> Result<(), StorageError>;
}

/// Computes the authenticity score attached to a new block.
///
/// Called inside the ledger's write section, after validation.
pub trait AuthenticityScorer: Send + Sync {
    fn score(&self, transaction: &Transaction) -> Result<AuthenticityScore, ScoringError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
