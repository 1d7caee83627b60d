//! Chat and user identities
//!
//! Sessions are keyed by the user's chat id; history rows are keyed by the
//! user's display name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a chat (a user's private chat or the administrator's)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// The person talking to the assistant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Chat the user talks from; replies go here
    pub id: ChatId,
    /// Full display name, recorded verbatim in the history log
    pub display_name: String,
}

impl User {
    /// Create a new user identity
    pub fn new(id: impl Into<ChatId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_display() {
        assert_eq!(ChatId(8139).to_string(), "8139");
        assert_eq!(ChatId::default(), ChatId(0));
    }

    #[test]
    fn test_chat_id_serde_transparent() {
        let json = serde_json::to_string(&ChatId(12)).unwrap();
        assert_eq!(json, "12");
    }
}
