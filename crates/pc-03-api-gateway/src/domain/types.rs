//! Request and response bodies.

use serde::{Deserialize, Serialize};
use shared_types::{Action, ActionType, Block, Transaction, ValidationError, VoteType};

/// Body of `POST /transact`.
///
/// Flat form used by the web client; which optional fields are required
/// depends on `action`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactRequest {
    pub sender: String,
    pub action: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub target_hash: Option<String>,
    #[serde(default)]
    pub vote_type: Option<String>,
    #[serde(default)]
    pub target_user: Option<String>,
}

impl TransactRequest {
    /// Build the typed transaction. Empty strings count as missing.
    pub fn into_transaction(self) -> Result<Transaction, ValidationError> {
        let action_type = self
            .action
            .parse::<ActionType>()
            .map_err(ValidationError::UnknownAction)?;

        let field = |value: Option<String>, name: &'static str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or(ValidationError::MissingField {
                    action: action_type,
                    field: name,
                })
        };

        let action = match action_type {
            ActionType::Genesis => return Err(ValidationError::ReservedAction(action_type)),
            ActionType::RegisterUser => Action::RegisterUser,
            ActionType::Follow => Action::Follow {
                target_user: field(self.target_user, "target_user")?,
            },
            ActionType::Unfollow => Action::Unfollow {
                target_user: field(self.target_user, "target_user")?,
            },
            ActionType::SetProfile => Action::SetProfile {
                content: field(self.content, "content")?,
            },
            ActionType::PostImage => Action::PostImage {
                content: field(self.content, "content")?,
            },
            ActionType::Repost => Action::Repost {
                target_hash: field(self.target_hash, "target_hash")?,
            },
            ActionType::Unrepost => Action::Unrepost {
                target_hash: field(self.target_hash, "target_hash")?,
            },
            ActionType::SavePost => Action::SavePost {
                target_hash: field(self.target_hash, "target_hash")?,
            },
            ActionType::Vote => {
                let target_hash = field(self.target_hash, "target_hash")?;
                let vote_type = field(self.vote_type, "vote_type")?
                    .parse::<VoteType>()
                    .map_err(ValidationError::InvalidVoteType)?;
                Action::Vote {
                    target_hash,
                    vote_type,
                }
            }
            ActionType::Comment => Action::Comment {
                target_hash: field(self.target_hash, "target_hash")?,
                content: field(self.content, "content")?,
            },
            ActionType::PrivateMsg => Action::PrivateMsg {
                target_user: field(self.target_user, "target_user")?,
                content: field(self.content, "content")?,
            },
        };

        Ok(Transaction::new(self.sender, action))
    }
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub sender: String,
}

/// Acknowledgement for an appended transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactResponse {
    /// Hex hash of the new block.
    pub hash: String,
    pub sequence_index: u64,
}

impl From<&Block> for TransactResponse {
    fn from(block: &Block) -> Self {
        Self {
            hash: block.hash_hex(),
            sequence_index: block.sequence_index,
        }
    }
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Blob token to use as POST_IMAGE content.
    pub filename: String,
}

/// Query string of the search endpoints (`?q=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub blocks: usize,
    pub tip_hash: Option<String>,
    pub halted: bool,
}
