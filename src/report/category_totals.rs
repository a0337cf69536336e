//! The category totals report: the all-time expense sum of every
//! category the account owns, plus a synthetic "Other" bucket for
//! uncategorised spend.

use std::collections::HashMap;

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::{
    Error,
    models::{AccountId, DatabaseID},
    report::ReportState,
    stores::{CategoryStore, ExpenseStore},
};

/// The name of the synthetic bucket for uncategorised expenses.
const OTHER_BUCKET_NAME: &str = "Other";

/// One row of the category totals report.
#[derive(Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category's ID, or `None` for the synthetic "Other" bucket.
    pub category_id: Option<DatabaseID>,
    /// The category's name.
    pub name: String,
    /// The all-time sum of expenses in the category.
    pub total: f64,
}

/// Sum the account's expenses per category, over all time.
///
/// Every category the account owns appears, even with a total of zero.
/// The "Other" bucket for uncategorised expenses is appended last, and
/// only when its sum is strictly positive: named categories always
/// show, the synthetic bucket is suppressed when empty.
pub fn category_totals(
    account_id: AccountId,
    categories: &impl CategoryStore,
    expenses: &impl ExpenseStore,
) -> Result<Vec<CategoryTotal>, Error> {
    let sums: HashMap<DatabaseID, f64> =
        expenses.sum_by_category(account_id)?.into_iter().collect();

    let mut totals: Vec<CategoryTotal> = categories
        .get_by_account(account_id)?
        .into_iter()
        .map(|category| CategoryTotal {
            category_id: Some(category.id),
            name: category.name.to_string(),
            total: sums.get(&category.id).copied().unwrap_or(0.0),
        })
        .collect();

    let uncategorised = expenses.sum_uncategorised(account_id)?;
    if uncategorised > 0.0 {
        totals.push(CategoryTotal {
            category_id: None,
            name: OTHER_BUCKET_NAME.to_string(),
            total: uncategorised,
        });
    }

    Ok(totals)
}

/// Handler for the category totals report.
pub async fn get_expenses_by_category(
    State(state): State<ReportState>,
    Extension(account_id): Extension<AccountId>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    category_totals(account_id, &state.category_store, &state.expense_store).map(Json)
}

#[cfg(test)]
mod category_totals_tests {
    use time::macros::date;

    use crate::{
        bootstrap::seed_default_categories,
        models::{Account, NewExpense},
        stores::{
            CategoryStore, ExpenseStore,
            sqlite::{
                SQLiteCategoryStore, SQLiteExpenseStore,
                test_utils::{get_test_connection, insert_test_account},
            },
        },
    };

    use super::category_totals;

    fn get_test_setup() -> (SQLiteCategoryStore, SQLiteExpenseStore, Account) {
        let connection = get_test_connection();
        let account = insert_test_account(connection.clone(), "alice");

        (
            SQLiteCategoryStore::new(connection.clone()),
            SQLiteExpenseStore::new(connection),
            account,
        )
    }

    #[test]
    fn fresh_account_has_five_zero_totals_and_no_other_bucket() {
        let (categories, expenses, account) = get_test_setup();
        seed_default_categories(account.id, &categories).unwrap();

        let totals = category_totals(account.id, &categories, &expenses).unwrap();

        let expected: Vec<(&str, f64)> = vec![
            ("Housing", 0.0),
            ("Food", 0.0),
            ("Transportation", 0.0),
            ("Health", 0.0),
            ("Entertainment", 0.0),
        ];
        let got: Vec<(&str, f64)> = totals
            .iter()
            .map(|total| (total.name.as_str(), total.total))
            .collect();

        assert_eq!(got, expected);
        assert!(totals.iter().all(|total| total.category_id.is_some()));
    }

    #[test]
    fn totals_are_all_time_and_the_other_bucket_collects_uncategorised_spend() {
        let (categories, expenses, account) = get_test_setup();
        let seeded = seed_default_categories(account.id, &categories).unwrap();
        let food = &seeded[1];

        // No date filter applies here: the previous-month expense still
        // counts, unlike in the monthly comparison.
        expenses
            .create(
                NewExpense::new("Mystery spend", 100.0, date!(2025 - 06 - 10), None).unwrap(),
                account.id,
            )
            .unwrap();
        expenses
            .create(
                NewExpense::new("Older mystery spend", 50.0, date!(2025 - 05 - 10), None).unwrap(),
                account.id,
            )
            .unwrap();
        expenses
            .create(
                NewExpense::new("Groceries", 20.0, date!(2025 - 06 - 12), Some(food.id)).unwrap(),
                account.id,
            )
            .unwrap();

        let totals = category_totals(account.id, &categories, &expenses).unwrap();

        let got: Vec<(&str, f64)> = totals
            .iter()
            .map(|total| (total.name.as_str(), total.total))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Housing", 0.0),
                ("Food", 20.0),
                ("Transportation", 0.0),
                ("Health", 0.0),
                ("Entertainment", 0.0),
                ("Other", 150.0),
            ]
        );

        let other = totals.last().unwrap();
        assert_eq!(other.category_id, None);
    }

    #[test]
    fn deleting_the_last_uncategorised_expense_removes_the_other_bucket() {
        let (categories, expenses, account) = get_test_setup();
        seed_default_categories(account.id, &categories).unwrap();

        let expense = expenses
            .create(
                NewExpense::new("Mystery spend", 100.0, date!(2025 - 06 - 10), None).unwrap(),
                account.id,
            )
            .unwrap();

        let totals = category_totals(account.id, &categories, &expenses).unwrap();
        assert!(totals.iter().any(|total| total.name == "Other"));

        expenses.delete(expense.id, account.id).unwrap();

        let totals = category_totals(account.id, &categories, &expenses).unwrap();
        assert!(totals.iter().all(|total| total.name != "Other"));
    }

    #[test]
    fn zero_amount_uncategorised_expense_does_not_create_the_other_bucket() {
        let (categories, expenses, account) = get_test_setup();
        seed_default_categories(account.id, &categories).unwrap();

        expenses
            .create(
                NewExpense::new("Free sample", 0.0, date!(2025 - 06 - 10), None).unwrap(),
                account.id,
            )
            .unwrap();

        let totals = category_totals(account.id, &categories, &expenses).unwrap();

        // The sum is not strictly positive, so the bucket is suppressed.
        assert!(totals.iter().all(|total| total.name != "Other"));
    }

    #[test]
    fn totals_never_include_another_accounts_rows() {
        let connection = get_test_connection();
        let alice = insert_test_account(connection.clone(), "alice");
        let bob = insert_test_account(connection.clone(), "bob");
        let categories = SQLiteCategoryStore::new(connection.clone());
        let expenses = SQLiteExpenseStore::new(connection);

        seed_default_categories(alice.id, &categories).unwrap();
        expenses
            .create(
                NewExpense::new("Mystery spend", 100.0, date!(2025 - 06 - 10), None).unwrap(),
                alice.id,
            )
            .unwrap();

        let totals = category_totals(bob.id, &categories, &expenses).unwrap();

        assert!(totals.is_empty());
    }
}
