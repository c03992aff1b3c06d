//! # Hasher / Chain-Linker
//!
//! `Hash = SHA-256(PrevHash ‖ canonical JSON(Transaction) ‖ "{e:.4}|{s:.4}" ‖ CreatedAt)`
//! where the score pair is formatted to four decimals and `CreatedAt` is the
//! decimal unix-seconds string.

use sha2::{Digest, Sha256};
use shared_types::{AuthenticityScore, Block, Hash, Timestamp, Transaction, ZERO_HASH};

/// Compute the hash of a block from its parts.
pub fn compute_block_hash(
    prev_hash: &Hash,
    transaction: &Transaction,
    score: AuthenticityScore,
    created_at: Timestamp,
) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(prev_hash);
    hasher.update(transaction.canonical_bytes());
    hasher.update(format!("{:.4}|{:.4}", score.entropy, score.std_dev).as_bytes());
    hasher.update(created_at.to_string().as_bytes());
    hasher.finalize().into()
}

/// Recompute the hash of a stored block.
pub fn rehash(block: &Block) -> Hash {
    compute_block_hash(
        &block.prev_hash,
        &block.transaction,
        block.score(),
        block.created_at,
    )
}

/// Build the block that follows `prev` (or the first block if `None`).
pub fn link_block(
    prev: Option<&Block>,
    transaction: Transaction,
    score: AuthenticityScore,
    created_at: Timestamp,
) -> Block {
    let (prev_hash, sequence_index) = match prev {
        Some(prev) => (prev.hash, prev.sequence_index + 1),
        None => (ZERO_HASH, 0),
    };
    let hash = compute_block_hash(&prev_hash, &transaction, score, created_at);
    Block {
        hash,
        prev_hash,
        transaction,
        entropy_score: score.entropy,
        std_dev_score: score.std_dev,
        sequence_index,
        created_at,
    }
}

/// The chain root: `{Sender: "SYSTEM", ActionType: "GENESIS"}` at index 0.
pub fn genesis_block(created_at: Timestamp) -> Block {
    link_block(
        None,
        Transaction::genesis(),
        AuthenticityScore::default(),
        created_at,
    )
}
