//! Defines the account store trait.

use crate::{
    Error,
    models::{Account, AccountId, Username},
    password::PasswordHash,
};

/// Creates and retrieves registered accounts.
pub trait AccountStore {
    /// Create a new account and add it to the store.
    ///
    /// # Errors
    /// Returns an [Error::DuplicateUsername] if the username is already registered.
    fn create(&self, username: Username, password_hash: PasswordHash) -> Result<Account, Error>;

    /// Get an account by its ID.
    fn get(&self, id: AccountId) -> Result<Account, Error>;

    /// Get an account by its exact, case-sensitive username.
    fn get_by_username(&self, username: &str) -> Result<Account, Error>;

    /// Delete an account. Owned rows are removed with it.
    fn delete(&self, id: AccountId) -> Result<(), Error>;
}
