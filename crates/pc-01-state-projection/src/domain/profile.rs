//! SET_PROFILE payload parsing.

use shared_types::UserProfile;
use std::collections::HashMap;

/// Partial profile update carried by SET_PROFILE.
///
/// Only keys present in the payload are applied; absent keys leave the
/// existing values untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    /// Parse the `ContentText` of a SET_PROFILE transaction.
    ///
    /// A JSON object whose values are all strings contributes its `bio`
    /// and `avatar` keys. JSON `null` changes nothing. Anything else,
    /// including an object with a non-string value, is taken verbatim as a
    /// plain-text bio.
    pub fn parse(content: &str) -> Self {
        match serde_json::from_str::<Option<HashMap<String, String>>>(content) {
            Ok(Some(mut map)) => Self {
                bio: map.remove("bio"),
                avatar: map.remove("avatar"),
            },
            Ok(None) => Self::default(),
            Err(_) => Self {
                bio: Some(content.to_owned()),
                avatar: None,
            },
        }
    }

    /// Merge into `profile`. An empty avatar clears it.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = if avatar.is_empty() { None } else { Some(avatar) };
        }
    }
}
