//! This file defines a registered account and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, password::PasswordHash};

/// A newtype wrapper for integer account IDs.
///
/// This helps disambiguate account IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(i64);

impl AccountId {
    /// Create an account ID from a raw integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The unique, case-sensitive handle an account registers and logs in with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

/// The minimum number of characters in a username.
const USERNAME_MIN_CHARS: usize = 3;
/// The maximum number of characters in a username.
const USERNAME_MAX_CHARS: usize = 255;

impl Username {
    /// Create and validate a username.
    ///
    /// # Errors
    /// Returns an [Error::InvalidName] if the username is shorter than three characters or longer
    /// than 255 characters.
    pub fn new(raw_username: &str) -> Result<Self, Error> {
        let char_count = raw_username.chars().count();

        if (USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&char_count) {
            Ok(Self(raw_username.to_string()))
        } else {
            Err(Error::InvalidName(format!(
                "username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} \
                 characters, got {char_count}"
            )))
        }
    }

    /// Create a username without any validation.
    ///
    /// The caller should ensure that `raw_username` meets the length requirements.
    pub fn new_unchecked(raw_username: &str) -> Self {
        Self(raw_username.to_string())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account.
///
/// The password hash is never serialized: API payloads built from an
/// account carry the ID and username only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Account {
    /// The account's ID in the database.
    pub id: AccountId,
    /// The account's unique handle.
    pub username: Username,
    /// The account's hashed password.
    #[serde(skip_serializing)]
    pub password_hash: PasswordHash,
}

#[cfg(test)]
mod username_tests {
    use crate::Error;

    use super::Username;

    #[test]
    fn new_accepts_three_to_255_characters() {
        assert!(Username::new("bob").is_ok());
        assert!(Username::new(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn new_rejects_too_short() {
        let result = Username::new("ab");

        assert!(matches!(result, Err(Error::InvalidName(_))));
    }

    #[test]
    fn new_rejects_too_long() {
        let result = Username::new(&"a".repeat(256));

        assert!(matches!(result, Err(Error::InvalidName(_))));
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // Three characters, nine bytes.
        assert!(Username::new("ふぃお").is_ok());
    }
}
