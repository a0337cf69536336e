//! Defines the category store trait.

use crate::{
    Error,
    models::{AccountId, Category, CategoryName, DatabaseID},
};

/// Creates and retrieves expense categories.
pub trait CategoryStore {
    /// Create a new category owned by `account_id`.
    fn create(&self, name: CategoryName, account_id: AccountId) -> Result<Category, Error>;

    /// Create several categories owned by `account_id` in a single
    /// transaction.
    ///
    /// Either every category is created, in the order given, or none
    /// are. The account bootstrapper relies on this to seed the default
    /// categories atomically.
    fn create_many(
        &self,
        names: &[CategoryName],
        account_id: AccountId,
    ) -> Result<Vec<Category>, Error>;

    /// Get a category by its ID, scoped to `account_id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if the category does not exist or belongs to another account.
    fn get(&self, category_id: DatabaseID, account_id: AccountId) -> Result<Category, Error>;

    /// Get all categories owned by `account_id`, in store iteration order.
    fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Category>, Error>;

    /// Rename a category, scoped to `account_id`.
    fn update_name(
        &self,
        category_id: DatabaseID,
        account_id: AccountId,
        name: CategoryName,
    ) -> Result<Category, Error>;

    /// Delete a category, scoped to `account_id`.
    ///
    /// Expenses tagged with the category keep existing with their
    /// category reference cleared.
    fn delete(&self, category_id: DatabaseID, account_id: AccountId) -> Result<(), Error>;
}
