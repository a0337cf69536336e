//! This file defines an income row and the validated data for creating or
//! updating one.

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    models::{
        AccountId, DatabaseID,
        expense::{validate_amount, validate_entry_name},
    },
};

/// A single income recorded against an account. Incomes have no category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Income {
    /// The income's ID in the database.
    pub id: DatabaseID,
    /// Where the money came from.
    pub name: String,
    /// The amount received. Never negative.
    pub amount: f64,
    /// The day the income occurred.
    pub date: Date,
    /// The account that owns the income.
    pub account_id: AccountId,
}

/// Validated data for creating a new income or overwriting an existing one.
#[derive(Clone, Debug, PartialEq)]
pub struct NewIncome {
    pub(crate) name: String,
    pub(crate) amount: f64,
    pub(crate) date: Date,
}

impl NewIncome {
    /// Validate the fields for an income.
    ///
    /// # Errors
    /// Returns an [Error::InvalidName] if `name` is empty or longer than 255 characters, or an
    /// [Error::InvalidAmount] if `amount` is negative or not finite.
    pub fn new(name: &str, amount: f64, date: Date) -> Result<Self, Error> {
        validate_entry_name(name, "income")?;
        validate_amount(amount)?;

        Ok(Self {
            name: name.to_string(),
            amount,
            date,
        })
    }
}

#[cfg(test)]
mod new_income_tests {
    use time::macros::date;

    use crate::Error;

    use super::NewIncome;

    #[test]
    fn new_rejects_negative_amount() {
        let result = NewIncome::new("Salary", -500.0, date!(2025 - 06 - 01));

        assert_eq!(result, Err(Error::InvalidAmount(-500.0)));
    }

    #[test]
    fn new_accepts_valid_income() {
        let income = NewIncome::new("Salary", 500.0, date!(2025 - 06 - 01)).unwrap();

        assert_eq!(income.name, "Salary");
        assert_eq!(income.amount, 500.0);
    }
}
