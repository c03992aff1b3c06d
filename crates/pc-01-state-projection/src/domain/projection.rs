//! # Projection Engine
//!
//! Deterministic fold of the ordered block sequence into `UsersState` and
//! `ImagesState`.
//!
//! ## Determinism
//!
//! `Projection::replay(blocks)` and folding the same blocks one at a time with
//! `apply` produce identical views. Every rule below is a total function of
//! the current views and the block; nothing reads the clock or the
//! environment.
//!
//! ## Tombstones
//!
//! An UNREPOST of `(sender, hash)` records its sequence index. A REPOST block
//! of the same pair is cancelled iff that recorded index is later than the
//! REPOST's own index, so a re-REPOST after an UNREPOST is active again.

use crate::domain::profile::ProfilePatch;
use crate::ports::StateQuery;
use shared_types::{
    Action, Block, Comment, ImageState, ImagesState, InboxMessage, UserProfile, UsersState,
    VoteType,
};
use std::collections::HashMap;

/// Materialized views over the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    users: UsersState,
    images: ImagesState,
    /// `(sender, content hash)` → sequence index of the latest UNREPOST.
    tombstones: HashMap<(String, String), u64>,
    /// Number of blocks folded so far (== next expected sequence index).
    blocks_applied: u64,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the views from scratch by folding `blocks` from genesis.
    pub fn replay<'a, I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = &'a Block>,
    {
        let mut projection = Self::new();
        for block in blocks {
            projection.apply(block);
        }
        projection
    }

    /// Fold one block into the views.
    ///
    /// Blocks must arrive in ledger order. Targets that do not exist are
    /// skipped; the validator keeps such transactions off the chain.
    pub fn apply(&mut self, block: &Block) {
        if block.sequence_index != self.blocks_applied {
            tracing::warn!(
                expected = self.blocks_applied,
                found = block.sequence_index,
                "[pc-01] block applied out of sequence"
            );
        }
        self.blocks_applied = block.sequence_index + 1;

        let sender = block.transaction.sender.as_str();
        let now = block.created_at;

        match &block.transaction.action {
            Action::Genesis => {}

            Action::RegisterUser => {
                self.users
                    .entry(sender.to_owned())
                    .or_insert_with(|| UserProfile::new(sender, now));
            }

            Action::Follow { target_user } => {
                if sender == target_user
                    || !self.users.contains_key(target_user)
                    || !self.users.contains_key(sender)
                {
                    return;
                }
                if let Some(profile) = self.users.get_mut(sender) {
                    profile.following.insert(target_user.clone());
                }
                if let Some(target) = self.users.get_mut(target_user) {
                    target.followers.insert(sender.to_owned());
                }
            }

            Action::Unfollow { target_user } => {
                if let Some(profile) = self.users.get_mut(sender) {
                    profile.following.remove(target_user);
                }
                if let Some(target) = self.users.get_mut(target_user) {
                    target.followers.remove(sender);
                }
            }

            Action::SetProfile { content } => {
                if let Some(profile) = self.users.get_mut(sender) {
                    ProfilePatch::parse(content).apply_to(profile);
                }
            }

            Action::PostImage { content } => {
                self.images
                    .entry(block.hash_hex())
                    .or_insert_with(|| ImageState::new(sender, content.clone(), now));
            }

            Action::Vote {
                target_hash,
                vote_type,
            } => {
                if let Some(image) = self.images.get_mut(target_hash) {
                    match vote_type {
                        VoteType::Believe => image.likes += 1,
                        VoteType::Fake => image.fakes += 1,
                    }
                }
            }

            Action::Comment {
                target_hash,
                content,
            } => {
                if let Some(image) = self.images.get_mut(target_hash) {
                    image.comments.push(Comment {
                        user: sender.to_owned(),
                        content: content.clone(),
                        timestamp: now,
                    });
                }
            }

            Action::Repost { target_hash } => {
                let inserted = self
                    .users
                    .get_mut(sender)
                    .map(|p| p.reposted.insert(target_hash.clone()))
                    .unwrap_or(false);
                if inserted {
                    if let Some(image) = self.images.get_mut(target_hash) {
                        image.reposts += 1;
                    }
                }
            }

            Action::Unrepost { target_hash } => {
                let removed = self
                    .users
                    .get_mut(sender)
                    .map(|p| p.reposted.remove(target_hash))
                    .unwrap_or(false);
                if removed {
                    if let Some(image) = self.images.get_mut(target_hash) {
                        image.reposts = image.reposts.saturating_sub(1);
                    }
                }
                self.tombstones.insert(
                    (sender.to_owned(), target_hash.clone()),
                    block.sequence_index,
                );
            }

            Action::SavePost { target_hash } => {
                if let Some(profile) = self.users.get_mut(sender) {
                    profile.saved_posts.insert(target_hash.clone());
                }
            }

            Action::PrivateMsg {
                target_user,
                content,
            } => {
                if let Some(target) = self.users.get_mut(target_user) {
                    target.inbox.push(InboxMessage {
                        from: sender.to_owned(),
                        content: content.clone(),
                        timestamp: now,
                    });
                }
            }
        }
    }

    pub fn users(&self) -> &UsersState {
        &self.users
    }

    pub fn images(&self) -> &ImagesState {
        &self.images
    }

    pub fn user(&self, username: &str) -> Option<&UserProfile> {
        self.users.get(username)
    }

    pub fn image(&self, content_hash: &str) -> Option<&ImageState> {
        self.images.get(content_hash)
    }

    pub fn blocks_applied(&self) -> u64 {
        self.blocks_applied
    }

    /// True if a later UNREPOST of the same `(sender, hash)` cancels the
    /// REPOST at `repost_index`.
    pub fn is_repost_cancelled(&self, sender: &str, content_hash: &str, repost_index: u64) -> bool {
        self.tombstones
            .get(&(sender.to_owned(), content_hash.to_owned()))
            .is_some_and(|&unrepost_index| unrepost_index > repost_index)
    }
}

impl StateQuery for Projection {
    fn is_registered(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    fn content_exists(&self, content_hash: &str) -> bool {
        self.images.contains_key(content_hash)
    }
}
