//! # Ports
//!
//! Read-only questions the validator asks of the projected state.

/// Membership queries the validator needs.
///
/// Implemented by [`crate::Projection`]; tests may provide their own.
pub trait StateQuery {
    /// True if `username` has a profile.
    fn is_registered(&self, username: &str) -> bool;

    /// True if `content_hash` was introduced by a POST_IMAGE block.
    fn content_exists(&self, content_hash: &str) -> bool;
}
