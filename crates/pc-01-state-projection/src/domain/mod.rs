//! Pure domain logic: projection, validation, moderation and feeds.

pub mod feed;
pub mod moderation;
pub mod profile;
pub mod projection;
pub mod validation;
