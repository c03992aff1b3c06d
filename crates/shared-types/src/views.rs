//! # Projected Views
//!
//! Materialized state derived from the ledger: one `UserProfile` per
//! registered user and one `ImageState` per POST_IMAGE block.
//!
//! Collections are ordered (`BTreeMap` / `BTreeSet`) so that two projections
//! of the same chain serialize to identical bytes.

use crate::entities::{Block, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Projected user state, keyed by username.
pub type UsersState = BTreeMap<String, UserProfile>;

/// Projected content state, keyed by the hex hash of the POST_IMAGE block.
pub type ImagesState = BTreeMap<String, ImageState>;

/// A direct message in a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InboxMessage {
    pub from: String,
    pub content: String,
    pub timestamp: Timestamp,
}

/// A comment under a piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Comment {
    pub user: String,
    pub content: String,
    pub timestamp: Timestamp,
}

/// A registered user's profile and social graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    pub username: String,
    pub bio: String,
    /// Blob-store filename of the avatar.
    pub avatar: Option<String>,
    pub registered_at: Timestamp,
    pub followers: BTreeSet<String>,
    pub following: BTreeSet<String>,
    /// Content hashes this user currently reposts.
    pub reposted: BTreeSet<String>,
    pub saved_posts: BTreeSet<String>,
    /// Messages in arrival order.
    pub inbox: Vec<InboxMessage>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, registered_at: Timestamp) -> Self {
        Self {
            username: username.into(),
            bio: String::new(),
            avatar: None,
            registered_at,
            followers: BTreeSet::new(),
            following: BTreeSet::new(),
            reposted: BTreeSet::new(),
            saved_posts: BTreeSet::new(),
            inbox: Vec::new(),
        }
    }

    pub fn is_following(&self, username: &str) -> bool {
        self.following.contains(username)
    }
}

/// Reputation and discussion attached to one posted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageState {
    /// BELIEVE votes.
    pub likes: u64,
    /// FAKE votes.
    pub fakes: u64,
    /// Comments in arrival order.
    pub comments: Vec<Comment>,
    /// Username that posted the image.
    pub author: String,
    /// Blob-store filename of the image.
    pub content: String,
    pub created_at: Timestamp,
    /// Number of users currently reposting this image.
    pub reposts: u64,
}

impl ImageState {
    pub fn new(author: impl Into<String>, content: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            likes: 0,
            fakes: 0,
            comments: Vec::new(),
            author: author.into(),
            content: content.into(),
            created_at,
            reposts: 0,
        }
    }
}

/// Borrowed view of the whole chain, serialized as the `/chain` response.
#[derive(Debug, Serialize)]
pub struct ChainView<'a> {
    #[serde(rename = "Blocks")]
    pub blocks: &'a [Block],
    #[serde(rename = "UsersState")]
    pub users: &'a UsersState,
    #[serde(rename = "ImagesState")]
    pub images: &'a ImagesState,
}

/// Owned counterpart of [`ChainView`], used by consumers that parse `/chain`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChainSnapshot {
    #[serde(rename = "Blocks")]
    pub blocks: Vec<Block>,
    #[serde(rename = "UsersState")]
    pub users: UsersState,
    #[serde(rename = "ImagesState")]
    pub images: ImagesState,
}
