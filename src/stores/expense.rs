//! Defines the expense store trait.

use time::Month;

use crate::{
    Error,
    models::{AccountId, DatabaseID, Expense, NewExpense},
};

/// Creates, retrieves, and sums expenses.
pub trait ExpenseStore {
    /// Create a new expense owned by `account_id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if the expense references a category that does not exist or
    /// belongs to another account.
    fn create(&self, expense: NewExpense, account_id: AccountId) -> Result<Expense, Error>;

    /// Get an expense by its ID, scoped to `account_id`.
    fn get(&self, expense_id: DatabaseID, account_id: AccountId) -> Result<Expense, Error>;

    /// Get all expenses owned by `account_id`.
    fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Expense>, Error>;

    /// Overwrite an expense's fields, scoped to `account_id`.
    fn update(
        &self,
        expense_id: DatabaseID,
        account_id: AccountId,
        expense: NewExpense,
    ) -> Result<Expense, Error>;

    /// Delete an expense, scoped to `account_id`. Deletion is permanent.
    fn delete(&self, expense_id: DatabaseID, account_id: AccountId) -> Result<(), Error>;

    /// Sum expense amounts per category for `account_id`, over all time.
    ///
    /// Only categories with at least one tagged expense appear;
    /// uncategorised expenses are excluded (see
    /// [ExpenseStore::sum_uncategorised]).
    fn sum_by_category(&self, account_id: AccountId) -> Result<Vec<(DatabaseID, f64)>, Error>;

    /// Sum the amounts of `account_id`'s expenses that have no category, over all time.
    fn sum_uncategorised(&self, account_id: AccountId) -> Result<f64, Error>;

    /// Sum the amounts of `account_id`'s expenses dated in the calendar
    /// month `month`, regardless of year.
    fn sum_for_month(&self, account_id: AccountId, month: Month) -> Result<f64, Error>;
}
