//! # Transaction Validator
//!
//! Rejects transactions that would leave the projection inconsistent.
//! Runs against the latest projected state, inside the ledger's write
//! section.
//!
//! Idempotent no-ops (re-registration, duplicate FOLLOW, UNFOLLOW of a
//! non-followed user) are accepted here; the projection enforces set
//! semantics.

use crate::domain::profile::ProfilePatch;
use crate::ports::StateQuery;
use shared_types::{
    is_hex_hash, Action, ActionType, TargetKind, Transaction, ValidationError, SYSTEM_SENDER,
};

/// Validate `tx` against the current state.
pub fn validate_transaction<S: StateQuery + ?Sized>(
    state: &S,
    tx: &Transaction,
) -> Result<(), ValidationError> {
    let action_type = tx.action_type();

    if action_type == ActionType::Genesis {
        return Err(ValidationError::ReservedAction(action_type));
    }

    check_sender_name(action_type, &tx.sender)?;

    if action_type == ActionType::RegisterUser {
        return Ok(());
    }

    if !state.is_registered(&tx.sender) {
        return Err(ValidationError::UnknownSender {
            sender: tx.sender.clone(),
        });
    }

    match &tx.action {
        Action::Genesis | Action::RegisterUser => Ok(()),

        // An empty avatar clears it.
        Action::SetProfile { content } => match ProfilePatch::parse(content).avatar {
            Some(avatar) if !avatar.is_empty() => check_filename(action_type, "avatar", &avatar),
            _ => Ok(()),
        },

        Action::Follow { target_user }
        | Action::Unfollow { target_user }
        | Action::PrivateMsg { target_user, .. } => {
            check_target_user(state, action_type, target_user)
        }

        Action::PostImage { content } => check_filename(action_type, "content", content),

        Action::Repost { target_hash }
        | Action::Unrepost { target_hash }
        | Action::SavePost { target_hash }
        | Action::Vote { target_hash, .. }
        | Action::Comment { target_hash, .. } => {
            check_target_hash(state, action_type, target_hash)
        }
    }
}

fn check_sender_name(action: ActionType, sender: &str) -> Result<(), ValidationError> {
    if sender.trim().is_empty() {
        return Err(ValidationError::MalformedField {
            action,
            field: "sender",
            reason: "empty".into(),
        });
    }
    if sender == SYSTEM_SENDER {
        return Err(ValidationError::MalformedField {
            action,
            field: "sender",
            reason: format!("{} is reserved", SYSTEM_SENDER),
        });
    }
    Ok(())
}

fn check_target_user<S: StateQuery + ?Sized>(
    state: &S,
    action: ActionType,
    target_user: &str,
) -> Result<(), ValidationError> {
    if target_user.trim().is_empty() {
        return Err(ValidationError::MalformedField {
            action,
            field: "target_user",
            reason: "empty".into(),
        });
    }
    if !state.is_registered(target_user) {
        return Err(ValidationError::UnknownTarget {
            kind: TargetKind::User,
            target: target_user.to_owned(),
        });
    }
    Ok(())
}

fn check_target_hash<S: StateQuery + ?Sized>(
    state: &S,
    action: ActionType,
    target_hash: &str,
) -> Result<(), ValidationError> {
    if !is_hex_hash(target_hash) {
        return Err(ValidationError::MalformedField {
            action,
            field: "target_hash",
            reason: "expected 64 lowercase hex characters".into(),
        });
    }
    if !state.content_exists(target_hash) {
        return Err(ValidationError::UnknownTarget {
            kind: TargetKind::Content,
            target: target_hash.to_owned(),
        });
    }
    Ok(())
}

/// Filenames are blob-store tokens, never paths.
fn check_filename(
    action: ActionType,
    field: &'static str,
    filename: &str,
) -> Result<(), ValidationError> {
    let reason = if filename.trim().is_empty() {
        "empty"
    } else if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
        "must be a bare filename"
    } else {
        return Ok(());
    };
    Err(ValidationError::MalformedField {
        action,
        field,
        reason: reason.into(),
    })
}
