//! Defines the income store trait.

use time::Month;

use crate::{
    Error,
    models::{AccountId, DatabaseID, Income, NewIncome},
};

/// Creates, retrieves, and sums incomes.
pub trait IncomeStore {
    /// Create a new income owned by `account_id`.
    fn create(&self, income: NewIncome, account_id: AccountId) -> Result<Income, Error>;

    /// Get an income by its ID, scoped to `account_id`.
    fn get(&self, income_id: DatabaseID, account_id: AccountId) -> Result<Income, Error>;

    /// Get all incomes owned by `account_id`.
    fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Income>, Error>;

    /// Overwrite an income's fields, scoped to `account_id`.
    fn update(
        &self,
        income_id: DatabaseID,
        account_id: AccountId,
        income: NewIncome,
    ) -> Result<Income, Error>;

    /// Delete an income, scoped to `account_id`. Deletion is permanent.
    fn delete(&self, income_id: DatabaseID, account_id: AccountId) -> Result<(), Error>;

    /// Sum the amounts of `account_id`'s incomes dated in the calendar
    /// month `month`, regardless of year.
    fn sum_for_month(&self, account_id: AccountId, month: Month) -> Result<f64, Error>;
}
