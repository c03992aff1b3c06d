//! # Ledger Service
//!
//! Owns the block sequence and the projection behind one `RwLock`.
//!
//! ## Critical Section
//!
//! Every append runs `validate → score → hash → persist → fold` under the
//! write lock, so the validator always sees the latest state and readers
//! only ever observe a fully folded prefix. Nothing is mutated until the
//! store accepts the block.


use crate::domain::audit::{verify_chain, AuditReport};
use crate::domain::hashing::{genesis_block, link_block};
use crate::ports::outbound::{AuthenticityScorer, LedgerStore, TimeSource};
use pc_01_state_projection::{validate_transaction, Projection};
use parking_lot::RwLock;
use shared_types::{
    AuthenticityScore, Block, ChainIntegrityError, ChainSnapshot, LedgerError, ScoringError,
    Transaction,
};

/// State guarded by the ledger lock.
struct LedgerState {
    blocks: Vec<Block>,
    projection: Projection,
    store: Box<dyn LedgerStore>,
    /// Set by a failed audit; the ledger refuses all further appends.
    halted: Option<String>,
}

impl LedgerState {
    fn ensure_running(&self) -> Result<(), ChainIntegrityError> {
        match &self.halted {
            Some(reason) => Err(ChainIntegrityError::Halted {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Link, persist and fold an already validated and scored transaction.
    fn commit(
        &mut self,
        transaction: Transaction,
        score: AuthenticityScore,
        created_at: u64,
    ) -> Result<Block, LedgerError> {
        if !score.is_finite() {
            return Err(ScoringError::NonFinite {
                entropy: score.entropy,
                std_dev: score.std_dev,
            }
            .into());
        }
        let block = link_block(self.blocks.last(), transaction, score, created_at);
        self.store.append(&block)?;
        self.projection.apply(&block);
        self.blocks.push(block.clone());

        tracing::info!(
            index = block.sequence_index,
            action = %block.transaction.action_type(),
            sender = %block.transaction.sender,
            hash = %block.hash_hex(),
            "[pc-02] 📦 block appended"
        );
        Ok(block)
    }
}

/// The append-only ledger and its projection.
///
/// Shared as `Arc<Ledger>`; all methods take `&self`.
pub struct Ledger {
    state: RwLock<LedgerState>,
    scorer: Box<dyn AuthenticityScorer>,
    clock: Box<dyn TimeSource>,
}

impl Ledger {
    /// Load the persisted chain, audit it and replay the projection.
    ///
    /// An empty store gets a fresh genesis block. A chain that fails the
    /// audit is refused.
    pub fn open(
        store: impl LedgerStore + 'static,
        scorer: impl AuthenticityScorer + 'static,
        clock: impl TimeSource + 'static,
    ) -> Result<Self, LedgerError> {
        let mut store: Box<dyn LedgerStore> = Box::new(store);
        let mut blocks = store.load()?;

        if blocks.is_empty() {
            let genesis = genesis_block(clock.now());
            store.append(&genesis)?;
            tracing::info!(hash = %genesis.hash_hex(), "[pc-02] 🌱 created genesis block");
            blocks.push(genesis);
        }

        let report = verify_chain(&blocks).map_err(|e| {
            tracing::error!("[pc-02] ❌ stored chain failed audit: {}", e);
            e
        })?;
        let projection = Projection::replay(&blocks);

        tracing::info!(
            blocks = report.blocks_verified,
            users = projection.users().len(),
            images = projection.images().len(),
            "[pc-02] ✅ ledger opened"
        );

        Ok(Self {
            state: RwLock::new(LedgerState {
                blocks,
                projection,
                store,
                halted: None,
            }),
            scorer: Box::new(scorer),
            clock: Box::new(clock),
        })
    }

    /// Append `transaction` with a precomputed score.
    pub fn append(
        &self,
        transaction: Transaction,
        score: AuthenticityScore,
    ) -> Result<Block, LedgerError> {
        let mut state = self.state.write();
        state.ensure_running()?;
        validate_transaction(&state.projection, &transaction)?;
        state.commit(transaction, score, self.clock.now())
    }

    /// Append `transaction`, scoring it with the configured scorer.
    pub fn submit(&self, transaction: Transaction) -> Result<Block, LedgerError> {
        let mut state = self.state.write();
        state.ensure_running()?;
        validate_transaction(&state.projection, &transaction)?;
        let score = self.scorer.score(&transaction).map_err(|e| {
            tracing::warn!(
                sender = %transaction.sender,
                action = %transaction.action_type(),
                "[pc-02] scoring failed: {}",
                e
            );
            e
        })?;
        state.commit(transaction, score, self.clock.now())
    }

    /// Every block, oldest first.
    pub fn read_all(&self) -> Vec<Block> {
        self.state.read().blocks.clone()
    }

    /// Run `f` against a consistent view of the blocks and the projection.
    pub fn with_view<R>(&self, f: impl FnOnce(&[Block], &Projection) -> R) -> R {
        let state = self.state.read();
        f(&state.blocks, &state.projection)
    }

    /// Owned copy of the chain and both views.
    pub fn snapshot(&self) -> ChainSnapshot {
        self.with_view(|blocks, projection| ChainSnapshot {
            blocks: blocks.to_vec(),
            users: projection.users().clone(),
            images: projection.images().clone(),
        })
    }

    /// Re-verify the persisted chain and compare it with memory.
    ///
    /// An integrity failure halts the ledger permanently. Storage errors
    /// while reading the chain are returned without halting.
    pub fn audit(&self) -> Result<AuditReport, LedgerError> {
        let mut state = self.state.write();
        state.ensure_running()?;

        let persisted = state.store.load()?;
        let outcome = verify_chain(&persisted).and_then(|report| {
            match first_divergence(&persisted, &state.blocks) {
                Some(index) => Err(ChainIntegrityError::Diverged { index }),
                None => Ok(report),
            }
        });

        match outcome {
            Ok(report) => {
                tracing::debug!(blocks = report.blocks_verified, "[pc-02] audit passed");
                Ok(report)
            }
            Err(e) => {
                tracing::error!("[pc-02] 🛑 audit failed, halting ledger: {}", e);
                state.halted = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn is_halted(&self) -> bool {
        self.state.read().halted.is_some()
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.state.read().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hex hash of the newest block.
    pub fn tip_hash(&self) -> Option<String> {
        self.state.read().blocks.last().map(Block::hash_hex)
    }
}

/// Index of the first block where the two chains disagree, if any.
fn first_divergence(persisted: &[Block], memory: &[Block]) -> Option<u64> {
    persisted
        .iter()
        .zip(memory)
        .position(|(a, b)| a.hash != b.hash)
        .or_else(|| (persisted.len() != memory.len()).then(|| persisted.len().min(memory.len())))
        .map(|index| index as u64)
}
