//! # Chain Audit
//!
//! Re-verifies a block sequence from genesis: genesis shape, gapless
//! indices, hash links, recomputed hashes and hash uniqueness. The first
//! violation is returned; the chain is never repaired.

use crate::domain::hashing::rehash;
use serde::Serialize;
use shared_types::{
    hash_to_hex, Action, Block, ChainIntegrityError, SYSTEM_SENDER, ZERO_HASH,
};
use std::collections::HashSet;

/// Summary of a successful audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub blocks_verified: u64,
    /// Hex hash of the last block, `None` for an empty chain.
    pub tip_hash: Option<String>,
}

/// Verify `blocks` as a complete chain starting at genesis.
pub fn verify_chain(blocks: &[Block]) -> Result<AuditReport, ChainIntegrityError> {
    let Some(genesis) = blocks.first() else {
        return Ok(AuditReport {
            blocks_verified: 0,
            tip_hash: None,
        });
    };
    check_genesis(genesis)?;

    let mut seen = HashSet::with_capacity(blocks.len());
    let mut prev: Option<&Block> = None;

    for (position, block) in blocks.iter().enumerate() {
        let expected_index = position as u64;
        if block.sequence_index != expected_index {
            return Err(ChainIntegrityError::SequenceGap {
                expected: expected_index,
                found: block.sequence_index,
            });
        }

        let expected_prev = prev.map(|p| p.hash).unwrap_or(ZERO_HASH);
        if block.prev_hash != expected_prev {
            return Err(ChainIntegrityError::BrokenLink {
                index: block.sequence_index,
                prev_hash: hash_to_hex(&block.prev_hash),
                expected: hash_to_hex(&expected_prev),
            });
        }

        let computed = rehash(block);
        if computed != block.hash {
            return Err(ChainIntegrityError::HashMismatch {
                index: block.sequence_index,
                stored: block.hash_hex(),
                computed: hash_to_hex(&computed),
            });
        }

        if !seen.insert(block.hash) {
            return Err(ChainIntegrityError::DuplicateHash {
                index: block.sequence_index,
                hash: block.hash_hex(),
            });
        }

        prev = Some(block);
    }

    Ok(AuditReport {
        blocks_verified: blocks.len() as u64,
        tip_hash: prev.map(Block::hash_hex),
    })
}

fn check_genesis(block: &Block) -> Result<(), ChainIntegrityError> {
    let reason = if block.sequence_index != 0 {
        format!("sequence index {}", block.sequence_index)
    } else if block.prev_hash != ZERO_HASH {
        "non-zero prev_hash".to_string()
    } else if !matches!(block.transaction.action, Action::Genesis) {
        format!("action {}", block.transaction.action_type())
    } else if block.transaction.sender != SYSTEM_SENDER {
        format!("sender {}", block.transaction.sender)
    } else {
        return Ok(());
    };
    Err(ChainIntegrityError::InvalidGenesis { reason })
}
