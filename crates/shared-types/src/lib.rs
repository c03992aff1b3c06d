//! # Shared Types Crate
//!
//! This crate contains the ledger entities, the projected views and the error
//! taxonomy used by every PhotoChain subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Wire Compatibility**: Field names and encodings match what the web
//!   client already consumes (`Blocks`, `UsersState`, `ImagesState`).
//! - **Closed Action Set**: A transaction carries exactly one `Action`
//!   variant; every consumer matches on it exhaustively.

pub mod entities;
pub mod errors;
pub mod views;

pub use entities::*;
pub use errors::*;
pub use views::*;
