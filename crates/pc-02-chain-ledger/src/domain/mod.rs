//! Pure chain logic: no I/O, no locks.

pub mod audit;
pub mod hashing;
