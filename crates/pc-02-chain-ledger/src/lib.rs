//! # Chain Ledger (pc-02)
//!
//! The authoritative, append-only record of every transaction. Each block is
//! hash-linked to its predecessor, carries the authenticity score computed
//! at ingestion, and is folded into the projection (pc-01) in the same
//! critical section that persists it.
//!
//! ## Write Path
//!
//! ```text
//! submit(tx) ──→ [validate] ──→ [score] ──→ [hash + link] ──→ [persist] ──→ [fold]
//!                    │              │                             │
//!                    └── reject ────┴──────── abort ──────────────┘
//!                         (nothing mutated on any failure)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Genesis Root | Block 0 wraps the reserved GENESIS transaction, zero `PrevHash` |
//! | 2 | Hash Linking | `PrevHash[i] == Hash[i-1]` for every `i > 0` |
//! | 3 | Gapless Sequence | `SequenceIndex` is `0, 1, 2, ...` in storage order |
//! | 4 | Atomic Append | Validation, scoring, persistence and fold succeed together or not at all |
//! | 5 | Halt on Tamper | A failed audit halts the ledger; it is never repaired |
//! | 6 | Single Writer | One process per data directory (flock) |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - hashing and chain audit (pure functions)
//! - `ports/` - outbound traits: store, scorer, clock
//! - `adapters/` - memory/file stores, histogram scorer, data-dir lock
//! - `service/` - the `Ledger`
//!
//! ## Usage
//!
//! ```ignore
//! use pc_02_chain_ledger::{InMemoryLedgerStore, Ledger, NullScorer, SystemTimeSource};
//!
//! let ledger = Ledger::open(InMemoryLedgerStore::new(), NullScorer, SystemTimeSource)?;
//! let block = ledger.submit(Transaction::new("alice", Action::RegisterUser))?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::lock::{DataDirLock, LOCK_FILE};
pub use adapters::scorer::{analyze_bytes, HistogramScorer, NullScorer, ScoringPolicy};
pub use adapters::storage::{FileLedgerStore, InMemoryLedgerStore, CHAIN_FILE};
pub use domain::audit::{verify_chain, AuditReport};
pub use domain::hashing::{compute_block_hash, genesis_block, link_block};
pub use ports::outbound::{AuthenticityScorer, LedgerStore, SystemTimeSource, TimeSource};
pub use service::Ledger;
