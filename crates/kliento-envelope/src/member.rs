//! Identity of an envelope signer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Member of an organisation, or the organisation itself when `user` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Organisation name (e.g., "example.com").
    pub organisation: String,

    /// User name within the organisation (e.g., "alice").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Member {
    /// A user within an organisation.
    pub fn user(organisation: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            organisation: organisation.into(),
            user: Some(user.into()),
        }
    }

    /// An organisation acting on its own behalf.
    pub fn organisation(organisation: impl Into<String>) -> Self {
        Self {
            organisation: organisation.into(),
            user: None,
        }
    }

    /// Identifier of the member, e.g. `alice@example.com` or `example.com`.
    #[must_use]
    pub fn id(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}@{}", self.organisation),
            None => self.organisation.clone(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn Member___id___user_is_qualified_by_organisation() {
        let member = Member::user("example.com", "alice");

        assert_eq!(member.id(), "alice@example.com");
    }

    #[test]
    fn Member___id___organisation_bot_is_organisation_name() {
        let member = Member::organisation("example.com");

        assert_eq!(member.id(), "example.com");
        assert_eq!(member.to_string(), "example.com");
    }

    #[test]
    fn Member___serde___omits_missing_user() {
        let json = serde_json::to_string(&Member::organisation("example.com")).unwrap();

        assert_eq!(json, r#"{"organisation":"example.com"}"#);
    }
}
