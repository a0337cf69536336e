//! This file defines an expense category and its name type.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{AccountId, DatabaseID},
};

/// The maximum number of characters in a category name.
const CATEGORY_NAME_MAX_CHARS: usize = 255;

/// The name of a category. Must be a non-empty string of at most 255 characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create and validate a category name.
    ///
    /// # Errors
    /// Returns an [Error::InvalidName] if the name is empty or longer than 255 characters.
    pub fn new(raw_name: &str) -> Result<Self, Error> {
        let char_count = raw_name.chars().count();

        if (1..=CATEGORY_NAME_MAX_CHARS).contains(&char_count) {
            Ok(Self(raw_name.to_string()))
        } else {
            Err(Error::InvalidName(format!(
                "category name must be between 1 and {CATEGORY_NAME_MAX_CHARS} characters, \
                 got {char_count}"
            )))
        }
    }

    /// Create a category name without any validation.
    ///
    /// The caller should ensure that `raw_name` is non-empty and at most 255 characters.
    pub fn new_unchecked(raw_name: &str) -> Self {
        Self(raw_name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category that expenses can be tagged with, owned by one account.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Category {
    /// The category's ID in the database.
    pub id: DatabaseID,
    /// The category's name.
    pub name: CategoryName,
    /// The account that owns the category.
    pub account_id: AccountId,
}

#[cfg(test)]
mod category_name_tests {
    use crate::Error;

    use super::CategoryName;

    #[test]
    fn new_rejects_empty_name() {
        let result = CategoryName::new("");

        assert!(matches!(result, Err(Error::InvalidName(_))));
    }

    #[test]
    fn new_rejects_overlong_name() {
        let result = CategoryName::new(&"x".repeat(256));

        assert!(matches!(result, Err(Error::InvalidName(_))));
    }

    #[test]
    fn new_accepts_reasonable_name() {
        let name = CategoryName::new("Groceries").unwrap();

        assert_eq!(name.as_ref(), "Groceries");
    }
}
