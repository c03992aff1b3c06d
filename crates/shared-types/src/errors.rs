//! # Error Types
//!
//! The error taxonomy shared by the ledger, the projection and the gateway.
//!
//! | Error | Raised by | Effect |
//! |-------|-----------|--------|
//! | `ValidationError` | Transaction Validator | rejected before any mutation |
//! | `ScoringError` | Authenticity Scorer | append aborted, nothing persisted |
//! | `ChainIntegrityError` | Replay / audit | ledger halted, never repaired |
//! | `StorageError` | Ledger persistence | append aborted, nothing projected |

use crate::entities::ActionType;
use thiserror::Error;

/// What kind of target a transaction pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A registered username (`TargetUser`).
    User,
    /// A content hash introduced by POST_IMAGE (`TargetHash`).
    Content,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::User => f.write_str("user"),
            TargetKind::Content => f.write_str("content"),
        }
    }
}

/// A submitted transaction was rejected before touching the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Sender never registered.
    #[error("Unknown sender: {sender} is not registered")]
    UnknownSender { sender: String },

    /// `TargetUser` or `TargetHash` does not exist.
    #[error("Unknown {kind} target: {target}")]
    UnknownTarget { kind: TargetKind, target: String },

    /// A field is present but unusable.
    #[error("Malformed {field} for {action}: {reason}")]
    MalformedField {
        action: ActionType,
        field: &'static str,
        reason: String,
    },

    /// A field required by the action is absent.
    #[error("Missing {field} for {action}")]
    MissingField {
        action: ActionType,
        field: &'static str,
    },

    /// `action` does not name a known action type.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// `vote_type` is neither BELIEVE nor FAKE.
    #[error("Invalid vote type: {0}")]
    InvalidVoteType(String),

    /// The action is reserved for the ledger itself.
    #[error("Action {0} cannot be submitted")]
    ReservedAction(ActionType),
}

/// The authenticity scorer could not produce a score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The referenced media file does not exist in the blob store.
    #[error("Media not found: {filename} (upload it first)")]
    MediaNotFound { filename: String },

    /// The scorer failed or is unreachable.
    #[error("Scorer unavailable: {0}")]
    Unavailable(String),

    /// The admission policy rejected the media.
    #[error("Media rejected by scorer: entropy {entropy:.4}, std-dev {std_dev:.4}")]
    Rejected { entropy: f64, std_dev: f64 },

    /// The scorer produced NaN or an infinite value.
    #[error("Scorer returned a non-finite score: entropy {entropy}, std-dev {std_dev}")]
    NonFinite { entropy: f64, std_dev: f64 },
}

/// The stored chain does not verify. Fatal for the ledger instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainIntegrityError {
    /// The first block is not a well-formed genesis block.
    #[error("Invalid genesis block: {reason}")]
    InvalidGenesis { reason: String },

    /// A block's stored hash differs from its recomputed hash.
    #[error("Hash mismatch at block {index}: stored {stored}, computed {computed}")]
    HashMismatch {
        index: u64,
        stored: String,
        computed: String,
    },

    /// A block does not link to its predecessor.
    #[error("Broken link at block {index}: prev_hash {prev_hash} does not match {expected}")]
    BrokenLink {
        index: u64,
        prev_hash: String,
        expected: String,
    },

    /// Sequence indices are not gapless.
    #[error("Sequence gap: expected index {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },

    /// The same hash appears twice.
    #[error("Duplicate block hash {hash} at index {index}")]
    DuplicateHash { index: u64, hash: String },

    /// The persisted chain no longer matches the chain held in memory.
    #[error("Stored chain diverges from the in-memory chain at block {index}")]
    Diverged { index: u64 },

    /// A previous audit failed; the ledger refuses further work.
    #[error("Ledger halted after integrity failure: {reason}")]
    Halted { reason: String },
}

/// Persistence failure in the ledger store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Another process holds the data directory.
    #[error("Data directory locked: {0}")]
    Locked(String),
}

/// Umbrella error returned by ledger operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Integrity(#[from] ChainIntegrityError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
