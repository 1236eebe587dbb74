//! Learner identity.
//!
//! The username is the only identity: there is no password. Input is trimmed
//! and lowercased before use so `" Ada "` and `"ada"` name the same learner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum accepted username length, in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameValidationError {
    /// Input was empty once trimmed.
    #[error("username must not be empty")]
    Empty,
    /// Input exceeded [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    TooLong { max: usize },
}

/// Normalised learner name: trimmed, lowercased and non-empty.
///
/// # Examples
/// ```
/// use backend::domain::Username;
///
/// let name = Username::new("  Ada ").expect("valid username");
/// assert_eq!(name.as_ref(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Normalise and validate raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if normalised.chars().count() > USERNAME_MAX {
            return Err(UsernameValidationError::TooLong { max: USERNAME_MAX });
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A learner known to the system. Created lazily on first login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Normalised identity.
    pub username: Username,
    /// When the learner first logged in.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user record.
    pub fn new(username: Username, created_at: DateTime<Utc>) -> Self {
        Self {
            username,
            created_at,
        }
    }
}
