//! # pc-01-state-projection
//!
//! State Projection subsystem for PhotoChain.
//!
//! ## Role in System
//!
//! - **Single Source of Truth** for derived state: folds the ordered block
//!   sequence into `UsersState` and `ImagesState`.
//! - **Gatekeeper**: validates submitted transactions against the current
//!   projection before the ledger accepts them.
//! - **Read Side**: moderation filter and feed/explore reconstruction.
//!
//! ## Flow
//!
//! ```text
//! submit ──→ [validation] ──ok──→ Ledger (pc-02) ──Block──→ [projection]
//!                                                              │
//!            [feed / explore] ←── [moderation] ←───────────────┘
//! ```
//!
//! ## Invariants
//!
//! | ID | Invariant |
//! |----|-----------|
//! | 1 | Replaying the chain from genesis equals folding it block by block |
//! | 2 | Projection rules are total: a validated block never fails to apply |
//! | 3 | Followers/Following/Reposted/SavedPosts have set semantics |
//! | 4 | Moderation is evaluated at query time, never cached |

pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_utils;

pub use domain::feed::{ActivityEntry, FeedEntry, FeedQuery};
pub use domain::moderation::{is_hidden, is_visible, SUPPRESSION_MARGIN};
pub use domain::profile::ProfilePatch;
pub use domain::projection::Projection;
pub use domain::validation::validate_transaction;
pub use ports::StateQuery;
