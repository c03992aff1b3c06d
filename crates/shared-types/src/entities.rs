//! # Core Domain Entities
//!
//! Defines the ledger entities: blocks, transactions and the closed set of
//! actions a transaction can carry.
//!
//! ## Wire Format
//!
//! Field names follow the JSON the web client already reads
//! (`Transaction.ActionType`, `Transaction.TargetHash`, `Block.Hash`, ...).
//! Block hashes travel as base64 inside `Block`; everywhere else (map keys,
//! `TargetHash`) content is addressed by the lowercase hex form.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte SHA-256 block hash.
pub type Hash = [u8; 32];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Genesis marker: the genesis block links to the all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Sender used for the genesis transaction. Reserved: users cannot register it.
pub const SYSTEM_SENDER: &str = "SYSTEM";

/// Lowercase hex form of a block hash, as used for map keys and `TargetHash`.
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parse a lowercase 64-char hex string back into a block hash.
pub fn hash_from_hex(s: &str) -> Option<Hash> {
    if !is_hex_hash(s) {
        return None;
    }
    let bytes = hex::decode(s).ok()?;
    bytes.try_into().ok()
}

/// True if `s` is exactly 64 lowercase hex characters.
pub fn is_hex_hash(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Discriminant of an [`Action`], used for parsing requests and for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Genesis,
    RegisterUser,
    Follow,
    Unfollow,
    SetProfile,
    PostImage,
    Repost,
    Unrepost,
    SavePost,
    Vote,
    Comment,
    PrivateMsg,
}

impl ActionType {
    /// Wire name of the action (`"REGISTER_USER"`, `"POST_IMAGE"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Genesis => "GENESIS",
            ActionType::RegisterUser => "REGISTER_USER",
            ActionType::Follow => "FOLLOW",
            ActionType::Unfollow => "UNFOLLOW",
            ActionType::SetProfile => "SET_PROFILE",
            ActionType::PostImage => "POST_IMAGE",
            ActionType::Repost => "REPOST",
            ActionType::Unrepost => "UNREPOST",
            ActionType::SavePost => "SAVE_POST",
            ActionType::Vote => "VOTE",
            ActionType::Comment => "COMMENT",
            ActionType::PrivateMsg => "PRIVATE_MSG",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GENESIS" => Ok(ActionType::Genesis),
            "REGISTER_USER" => Ok(ActionType::RegisterUser),
            "FOLLOW" => Ok(ActionType::Follow),
            "UNFOLLOW" => Ok(ActionType::Unfollow),
            "SET_PROFILE" => Ok(ActionType::SetProfile),
            "POST_IMAGE" => Ok(ActionType::PostImage),
            "REPOST" => Ok(ActionType::Repost),
            "UNREPOST" => Ok(ActionType::Unrepost),
            "SAVE_POST" => Ok(ActionType::SavePost),
            "VOTE" => Ok(ActionType::Vote),
            "COMMENT" => Ok(ActionType::Comment),
            "PRIVATE_MSG" => Ok(ActionType::PrivateMsg),
            other => Err(other.to_string()),
        }
    }
}

/// Verdict carried by a VOTE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteType {
    /// The voter believes the image is authentic.
    Believe,
    /// The voter flags the image as fake.
    Fake,
}

impl FromStr for VoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BELIEVE" => Ok(VoteType::Believe),
            "FAKE" => Ok(VoteType::Fake),
            other => Err(other.to_string()),
        }
    }
}

/// The state-changing action carried by a transaction.
///
/// Serialized internally tagged on `ActionType`, with the action-specific
/// fields flattened beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ActionType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Root of the chain. Never accepted from clients.
    Genesis,
    RegisterUser,
    Follow {
        #[serde(rename = "TargetUser")]
        target_user: String,
    },
    Unfollow {
        #[serde(rename = "TargetUser")]
        target_user: String,
    },
    /// `content` is a JSON object with optional `bio` / `avatar` keys.
    SetProfile {
        #[serde(rename = "ContentText")]
        content: String,
    },
    /// `content` is the blob-store filename of the image.
    PostImage {
        #[serde(rename = "ContentText")]
        content: String,
    },
    Repost {
        #[serde(rename = "TargetHash")]
        target_hash: String,
    },
    Unrepost {
        #[serde(rename = "TargetHash")]
        target_hash: String,
    },
    SavePost {
        #[serde(rename = "TargetHash")]
        target_hash: String,
    },
    Vote {
        #[serde(rename = "TargetHash")]
        target_hash: String,
        #[serde(rename = "VoteType")]
        vote_type: VoteType,
    },
    Comment {
        #[serde(rename = "TargetHash")]
        target_hash: String,
        #[serde(rename = "ContentText")]
        content: String,
    },
    PrivateMsg {
        #[serde(rename = "TargetUser")]
        target_user: String,
        #[serde(rename = "ContentText")]
        content: String,
    },
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Genesis => ActionType::Genesis,
            Action::RegisterUser => ActionType::RegisterUser,
            Action::Follow { .. } => ActionType::Follow,
            Action::Unfollow { .. } => ActionType::Unfollow,
            Action::SetProfile { .. } => ActionType::SetProfile,
            Action::PostImage { .. } => ActionType::PostImage,
            Action::Repost { .. } => ActionType::Repost,
            Action::Unrepost { .. } => ActionType::Unrepost,
            Action::SavePost { .. } => ActionType::SavePost,
            Action::Vote { .. } => ActionType::Vote,
            Action::Comment { .. } => ActionType::Comment,
            Action::PrivateMsg { .. } => ActionType::PrivateMsg,
        }
    }

    /// Content hash this action refers to, if any.
    pub fn target_hash(&self) -> Option<&str> {
        match self {
            Action::Repost { target_hash }
            | Action::Unrepost { target_hash }
            | Action::SavePost { target_hash }
            | Action::Vote { target_hash, .. }
            | Action::Comment { target_hash, .. } => Some(target_hash),
            _ => None,
        }
    }

    /// User this action refers to, if any.
    pub fn target_user(&self) -> Option<&str> {
        match self {
            Action::Follow { target_user }
            | Action::Unfollow { target_user }
            | Action::PrivateMsg { target_user, .. } => Some(target_user),
            _ => None,
        }
    }
}

// =============================================================================
// TRANSACTIONS & BLOCKS
// =============================================================================

/// A single state-changing action submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Sender")]
    pub sender: String,
    #[serde(flatten)]
    pub action: Action,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, action: Action) -> Self {
        Self {
            sender: sender.into(),
            action,
        }
    }

    /// The reserved transaction wrapped by the genesis block.
    pub fn genesis() -> Self {
        Self::new(SYSTEM_SENDER, Action::Genesis)
    }

    pub fn action_type(&self) -> ActionType {
        self.action.action_type()
    }

    /// Canonical bytes hashed into the block.
    ///
    /// Field order is fixed by the type definitions, so the encoding is
    /// stable across runs.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        // Serializing a plain struct of strings and enums into a Vec cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Authenticity figures attached to a block by the external scorer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthenticityScore {
    pub entropy: f64,
    pub std_dev: f64,
}

impl AuthenticityScore {
    pub fn new(entropy: f64, std_dev: f64) -> Self {
        Self { entropy, std_dev }
    }

    /// JSON has no encoding for NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.entropy.is_finite() && self.std_dev.is_finite()
    }
}

/// One hash-linked, append-only ledger entry.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// SHA-256 over `PrevHash ‖ Transaction ‖ scores ‖ CreatedAt`.
    #[serde(rename = "Hash")]
    #[serde_as(as = "Base64")]
    pub hash: Hash,
    /// Hash of the previous block; all zeroes for genesis.
    #[serde(rename = "PrevHash")]
    #[serde_as(as = "Base64")]
    pub prev_hash: Hash,
    #[serde(rename = "Transaction")]
    pub transaction: Transaction,
    #[serde(rename = "EntropyScore")]
    pub entropy_score: f64,
    #[serde(rename = "StdDevScore")]
    pub std_dev_score: f64,
    /// Position in the chain; genesis is 0.
    #[serde(rename = "SequenceIndex")]
    pub sequence_index: u64,
    /// Ingestion time (unix seconds).
    #[serde(rename = "CreatedAt")]
    pub created_at: Timestamp,
}

impl Block {
    /// Lowercase hex of this block's hash (the content key for POST_IMAGE).
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    pub fn score(&self) -> AuthenticityScore {
        AuthenticityScore::new(self.entropy_score, self.std_dev_score)
    }

    pub fn is_genesis(&self) -> bool {
        self.sequence_index == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_wire_shape() {
        let tx = Transaction::new(
            "bob",
            Action::Vote {
                target_hash: "ab".repeat(32),
                vote_type: VoteType::Fake,
            },
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["Sender"], "bob");
        assert_eq!(json["ActionType"], "VOTE");
        assert_eq!(json["VoteType"], "FAKE");
        assert_eq!(json["TargetHash"], "ab".repeat(32));

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn test_unit_action_wire_shape() {
        let tx = Transaction::new("alice", Action::RegisterUser);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Sender": "alice", "ActionType": "REGISTER_USER"})
        );
    }

    #[test]
    fn test_post_image_uses_content_text() {
        let tx = Transaction::new(
            "alice",
            Action::PostImage {
                content: "cat.png".into(),
            },
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["ContentText"], "cat.png");
    }

    #[test]
    fn test_block_hash_is_base64_on_the_wire() {
        let block = Block {
            hash: [0xFF; 32],
            prev_hash: ZERO_HASH,
            transaction: Transaction::genesis(),
            entropy_score: 0.0,
            std_dev_score: 0.0,
            sequence_index: 0,
            created_at: 1,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["Hash"], "//////////////////////////////////////////8=");
        assert_eq!(json["PrevHash"], "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=");

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
        assert_eq!(back.hash_hex(), "ff".repeat(32));
    }

    #[test]
    fn test_action_type_round_trips_through_str() {
        for name in ["REGISTER_USER", "PRIVATE_MSG", "SAVE_POST", "UNREPOST"] {
            let parsed: ActionType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
        assert!("LIKE".parse::<ActionType>().is_err());
    }

    #[test]
    fn test_hex_hash_helpers() {
        let hex = "0a".repeat(32);
        assert!(is_hex_hash(&hex));
        assert_eq!(hash_from_hex(&hex), Some([0x0a; 32]));
        assert!(!is_hex_hash(&"0A".repeat(32)));
        assert!(!is_hex_hash("abc"));
        assert_eq!(hash_from_hex("zz"), None);
    }
}
