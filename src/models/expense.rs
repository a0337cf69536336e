//! This file defines an expense row and the validated data for creating or
//! updating one.

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    models::{AccountId, DatabaseID},
};

/// The maximum number of characters in an expense or income name.
pub(crate) const ENTRY_NAME_MAX_CHARS: usize = 255;

pub(crate) fn validate_entry_name(raw_name: &str, field: &str) -> Result<(), Error> {
    let char_count = raw_name.chars().count();

    if (1..=ENTRY_NAME_MAX_CHARS).contains(&char_count) {
        Ok(())
    } else {
        Err(Error::InvalidName(format!(
            "{field} name must be between 1 and {ENTRY_NAME_MAX_CHARS} characters, \
             got {char_count}"
        )))
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<(), Error> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

/// A single expense recorded against an account.
///
/// The category is optional: an expense with no category counts towards
/// the synthetic "Other" bucket in the category totals report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expense {
    /// The expense's ID in the database.
    pub id: DatabaseID,
    /// What the money was spent on.
    pub name: String,
    /// The amount spent. Never negative.
    pub amount: f64,
    /// The day the expense occurred.
    pub date: Date,
    /// The category the expense is tagged with, if any.
    pub category_id: Option<DatabaseID>,
    /// The account that owns the expense.
    pub account_id: AccountId,
}

/// Validated data for creating a new expense or overwriting an existing one.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub(crate) name: String,
    pub(crate) amount: f64,
    pub(crate) date: Date,
    pub(crate) category_id: Option<DatabaseID>,
}

impl NewExpense {
    /// Validate the fields for an expense.
    ///
    /// # Errors
    /// Returns an [Error::InvalidName] if `name` is empty or longer than 255 characters, or an
    /// [Error::InvalidAmount] if `amount` is negative or not finite.
    pub fn new(
        name: &str,
        amount: f64,
        date: Date,
        category_id: Option<DatabaseID>,
    ) -> Result<Self, Error> {
        validate_entry_name(name, "expense")?;
        validate_amount(amount)?;

        Ok(Self {
            name: name.to_string(),
            amount,
            date,
            category_id,
        })
    }
}
