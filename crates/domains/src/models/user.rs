use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated user as cached on the client.
///
/// An identity with an empty `name` is the "signed out" identity; there is no
/// separate flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
}

impl UserIdentity {
    pub fn new(name: impl Into<String>, nick_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            nick_name,
        }
    }

    /// The signed-out identity.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.name.is_empty()
    }

    /// Nickname when set, otherwise the login name.
    pub fn display_name(&self) -> &str {
        self.nick_name
            .as_deref()
            .filter(|nick| !nick.is_empty())
            .unwrap_or(self.name.as_str())
    }
}

/// Login form values sent to the `authenticate` query.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
