//! This file defines the CRUD route handlers for expenses.

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    models::{AccountId, DatabaseID, Expense, NewExpense},
    stores::{ExpenseStore, sqlite::SQLiteExpenseStore},
};

/// The data sent with a create or update request.
///
/// The date is expected in ISO 8601 calendar date format, e.g.
/// "2025-06-15".
#[derive(Debug, Deserialize)]
pub struct ExpenseData {
    /// What the money was spent on.
    pub name: String,
    /// The amount spent.
    pub amount: f64,
    /// The day the expense occurred.
    pub date: Date,
    /// The category to tag the expense with, or `None` for
    /// uncategorised spend.
    #[serde(default)]
    pub category_id: Option<DatabaseID>,
}

/// The state needed for the expense endpoints.
#[derive(Clone)]
pub struct ExpenseEndpointState {
    /// Where expenses are persisted.
    pub expense_store: SQLiteExpenseStore,
}

impl FromRef<AppState> for ExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Handler that lists the account's expenses.
pub async fn get_expenses(
    State(state): State<ExpenseEndpointState>,
    Extension(account_id): Extension<AccountId>,
) -> Result<Json<Vec<Expense>>, Error> {
    state.expense_store.get_by_account(account_id).map(Json)
}

/// Handler that fetches a single expense.
pub async fn get_expense(
    State(state): State<ExpenseEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(expense_id): Path<DatabaseID>,
) -> Result<Json<Expense>, Error> {
    state.expense_store.get(expense_id, account_id).map(Json)
}

/// Handler that creates an expense.
pub async fn post_expense(
    State(state): State<ExpenseEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Json(data): Json<ExpenseData>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let expense = NewExpense::new(&data.name, data.amount, data.date, data.category_id)?;
    let expense = state.expense_store.create(expense, account_id)?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Handler that overwrites an expense.
pub async fn put_expense(
    State(state): State<ExpenseEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(expense_id): Path<DatabaseID>,
    Json(data): Json<ExpenseData>,
) -> Result<Json<Expense>, Error> {
    let expense = NewExpense::new(&data.name, data.amount, data.date, data.category_id)?;

    state
        .expense_store
        .update(expense_id, account_id, expense)
        .map(Json)
}

/// Handler that deletes an expense. Deletion is permanent.
pub async fn delete_expense(
    State(state): State<ExpenseEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(expense_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    state.expense_store.delete(expense_id, account_id)?;

    Ok(StatusCode::NO_CONTENT)
}
