//! # Moderation Filter
//!
//! Content is hidden from feed, explore and search once FAKE votes outnumber
//! BELIEVE votes by more than [`SUPPRESSION_MARGIN`]. Evaluated against the
//! current tallies on every query, so hidden content reappears as soon as
//! enough BELIEVE votes arrive.

use shared_types::ImageState;

/// FAKE votes tolerated above the BELIEVE count before content is hidden.
pub const SUPPRESSION_MARGIN: u64 = 2;

/// True if the content may appear on discovery surfaces.
pub fn is_visible(image: &ImageState) -> bool {
    image.fakes <= image.likes.saturating_add(SUPPRESSION_MARGIN)
}

/// True if `Fakes > Likes + 2`.
pub fn is_hidden(image: &ImageState) -> bool {
    !is_visible(image)
}
