use crate::domain::projection::Projection;
use sha2::{Digest, Sha256};
use shared_types::{Action, Block, Transaction, VoteType, ZERO_HASH};

/// Minimal in-memory chain that folds every pushed block.
///
/// Hashes only need to be unique here; the real chain linker lives in pc-02.
pub struct TestChain {
    pub blocks: Vec<Block>,
    pub projection: Projection,
}

impl TestChain {
    pub fn new() -> Self {
        let mut chain = Self {
            blocks: Vec::new(),
            projection: Projection::new(),
        };
        chain.push_tx(Transaction::genesis());
        chain
    }

    pub fn push_tx(&mut self, tx: Transaction) -> String {
        let index = self.blocks.len() as u64;
        let prev_hash = self.blocks.last().map(|b| b.hash).unwrap_or(ZERO_HASH);
        let mut hasher = Sha256::new();
        hasher.update(prev_hash);
        hasher.update(tx.canonical_bytes());
        hasher.update(index.to_le_bytes());
        let block = Block {
            hash: hasher.finalize().into(),
            prev_hash,
            transaction: tx,
            entropy_score: 0.0,
            std_dev_score: 0.0,
            sequence_index: index,
            created_at: 1_000 + index,
        };
        self.projection.apply(&block);
        let hex = block.hash_hex();
        self.blocks.push(block);
        hex
    }

    pub fn push(&mut self, sender: &str, action: Action) -> String {
        self.push_tx(Transaction::new(sender, action))
    }

    pub fn register(&mut self, user: &str) -> String {
        self.push(user, Action::RegisterUser)
    }

    pub fn post(&mut self, user: &str, filename: &str) -> String {
        self.push(
            user,
            Action::PostImage {
                content: filename.into(),
            },
        )
    }

    pub fn follow(&mut self, user: &str, target: &str) -> String {
        self.push(
            user,
            Action::Follow {
                target_user: target.into(),
            },
        )
    }

    pub fn vote(&mut self, user: &str, target: &str, vote_type: VoteType) -> String {
        self.push(
            user,
            Action::Vote {
                target_hash: target.into(),
                vote_type,
            },
        )
    }

    pub fn repost(&mut self, user: &str, target: &str) -> String {
        self.push(
            user,
            Action::Repost {
                target_hash: target.into(),
            },
        )
    }

    pub fn unrepost(&mut self, user: &str, target: &str) -> String {
        self.push(
            user,
            Action::Unrepost {
                target_hash: target.into(),
            },
        )
    }
}
