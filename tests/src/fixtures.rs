//! Shared builders for the scenario tests and benchmarks.

use pc_02_chain_ledger::{InMemoryLedgerStore, Ledger, NullScorer, TimeSource};
use shared_types::{Action, Block, LedgerError, Transaction, VoteType};
use std::sync::atomic::{AtomicU64, Ordering};

/// Deterministic clock: starts at a fixed instant, one second per call.
pub struct StepClock(AtomicU64);

impl StepClock {
    pub fn new(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }
}

impl TimeSource for StepClock {
    fn now(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// In-memory ledger with a null scorer and a step clock.
pub fn memory_ledger() -> Result<Ledger, LedgerError> {
    Ledger::open(
        InMemoryLedgerStore::new(),
        NullScorer,
        StepClock::new(1_700_000_000),
    )
}

pub fn register(sender: &str) -> Transaction {
    Transaction::new(sender, Action::RegisterUser)
}

pub fn follow(sender: &str, target: &str) -> Transaction {
    Transaction::new(
        sender,
        Action::Follow {
            target_user: target.into(),
        },
    )
}

pub fn unfollow(sender: &str, target: &str) -> Transaction {
    Transaction::new(
        sender,
        Action::Unfollow {
            target_user: target.into(),
        },
    )
}

pub fn post_image(sender: &str, filename: &str) -> Transaction {
    Transaction::new(
        sender,
        Action::PostImage {
            content: filename.into(),
        },
    )
}

pub fn vote(sender: &str, block: &Block, vote_type: VoteType) -> Transaction {
    Transaction::new(
        sender,
        Action::Vote {
            target_hash: block.hash_hex(),
            vote_type,
        },
    )
}

pub fn repost(sender: &str, block: &Block) -> Transaction {
    Transaction::new(
        sender,
        Action::Repost {
            target_hash: block.hash_hex(),
        },
    )
}

pub fn unrepost(sender: &str, block: &Block) -> Transaction {
    Transaction::new(
        sender,
        Action::Unrepost {
            target_hash: block.hash_hex(),
        },
    )
}

pub fn set_profile(sender: &str, content: &str) -> Transaction {
    Transaction::new(
        sender,
        Action::SetProfile {
            content: content.into(),
        },
    )
}
