//! # Feed Reconstruction
//!
//! Query-side views built from the block list plus the projection: the home
//! feed, the explore grid, per-user post grids, user search and follow
//! activity. All post listings run through the moderation filter and are
//! returned newest first.

use crate::domain::moderation::is_visible;
use crate::domain::projection::Projection;
use serde::Serialize;
use shared_types::{Action, Block, ImageState, Timestamp, UserProfile};
use std::collections::HashSet;

/// One post (or repost) on a feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    /// Hex hash of the POST_IMAGE or REPOST block itself.
    pub block_hash: String,
    pub sequence_index: u64,
    pub created_at: Timestamp,
    /// Who posted or reposted it.
    pub sender: String,
    /// Hex hash of the original POST_IMAGE block.
    pub content_hash: String,
    pub is_repost: bool,
    pub image: ImageState,
}

/// Someone started following the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub follower: String,
    pub sequence_index: u64,
    pub created_at: Timestamp,
}

/// Read-only queries over a consistent `(blocks, projection)` pair.
pub struct FeedQuery<'a> {
    blocks: &'a [Block],
    projection: &'a Projection,
}

impl<'a> FeedQuery<'a> {
    pub fn new(blocks: &'a [Block], projection: &'a Projection) -> Self {
        Self { blocks, projection }
    }

    /// Posts and active reposts by `viewer` or by users `viewer` follows.
    ///
    /// A `(sender, post)` pair reposted more than once shows up once, at
    /// its newest active REPOST.
    pub fn home_feed(&self, viewer: &str) -> Vec<FeedEntry> {
        let profile = self.projection.user(viewer);
        let in_circle =
            |sender: &str| sender == viewer || profile.is_some_and(|p| p.is_following(sender));
        let mut reposts_seen: HashSet<(String, String)> = HashSet::new();

        self.blocks
            .iter()
            .rev()
            .filter(|block| in_circle(&block.transaction.sender))
            .filter_map(|block| self.entry_for(block, true))
            .filter(|entry| {
                !entry.is_repost
                    || reposts_seen.insert((entry.sender.clone(), entry.content_hash.clone()))
            })
            .collect()
    }

    /// Original posts, optionally narrowed to authors whose name contains
    /// `filter` (case-insensitive).
    pub fn explore(&self, filter: Option<&str>) -> Vec<FeedEntry> {
        let needle = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);

        self.blocks
            .iter()
            .rev()
            .filter(|block| match &needle {
                Some(needle) => block.transaction.sender.to_lowercase().contains(needle),
                None => true,
            })
            .filter_map(|block| self.entry_for(block, false))
            .collect()
    }

    /// Original posts by exactly `username`.
    pub fn user_posts(&self, username: &str) -> Vec<FeedEntry> {
        self.blocks
            .iter()
            .rev()
            .filter(|block| block.transaction.sender == username)
            .filter_map(|block| self.entry_for(block, false))
            .collect()
    }

    /// Profiles whose username contains `filter` (case-insensitive).
    pub fn search_users(&self, filter: &str) -> Vec<&'a UserProfile> {
        let needle = filter.trim().to_lowercase();
        self.projection
            .users()
            .values()
            .filter(|profile| profile.username.to_lowercase().contains(&needle))
            .collect()
    }

    /// FOLLOW blocks that target `username`, newest first.
    pub fn activity(&self, username: &str) -> Vec<ActivityEntry> {
        self.blocks
            .iter()
            .rev()
            .filter_map(|block| match &block.transaction.action {
                Action::Follow { target_user } if target_user == username => Some(ActivityEntry {
                    follower: block.transaction.sender.clone(),
                    sequence_index: block.sequence_index,
                    created_at: block.created_at,
                }),
                _ => None,
            })
            .collect()
    }

    /// Build the entry for a POST_IMAGE (or, with `include_reposts`, an
    /// active REPOST) block. `None` for other actions and hidden content.
    fn entry_for(&self, block: &Block, include_reposts: bool) -> Option<FeedEntry> {
        let sender = block.transaction.sender.as_str();
        let (content_hash, is_repost) = match &block.transaction.action {
            Action::PostImage { .. } => (block.hash_hex(), false),
            Action::Repost { target_hash } if include_reposts => {
                if self
                    .projection
                    .is_repost_cancelled(sender, target_hash, block.sequence_index)
                {
                    return None;
                }
                (target_hash.clone(), true)
            }
            _ => return None,
        };

        let image = self.projection.image(&content_hash)?;
        if !is_visible(image) {
            return None;
        }

        Some(FeedEntry {
            block_hash: block.hash_hex(),
            sequence_index: block.sequence_index,
            created_at: block.created_at,
            sender: sender.to_owned(),
            content_hash,
            is_repost,
            image: image.clone(),
        })
    }
}
