//! This file defines the CRUD route handlers for incomes.

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    models::{AccountId, DatabaseID, Income, NewIncome},
    stores::{IncomeStore, sqlite::SQLiteIncomeStore},
};

/// The data sent with a create or update request.
#[derive(Debug, Deserialize)]
pub struct IncomeData {
    /// Where the money came from.
    pub name: String,
    /// The amount received.
    pub amount: f64,
    /// The day the income occurred.
    pub date: Date,
}

/// The state needed for the income endpoints.
#[derive(Clone)]
pub struct IncomeEndpointState {
    /// Where incomes are persisted.
    pub income_store: SQLiteIncomeStore,
}

impl FromRef<AppState> for IncomeEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            income_store: state.income_store.clone(),
        }
    }
}

/// Handler that lists the account's incomes.
pub async fn get_incomes(
    State(state): State<IncomeEndpointState>,
    Extension(account_id): Extension<AccountId>,
) -> Result<Json<Vec<Income>>, Error> {
    state.income_store.get_by_account(account_id).map(Json)
}

/// Handler that fetches a single income.
pub async fn get_income(
    State(state): State<IncomeEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(income_id): Path<DatabaseID>,
) -> Result<Json<Income>, Error> {
    state.income_store.get(income_id, account_id).map(Json)
}

/// Handler that creates an income.
pub async fn post_income(
    State(state): State<IncomeEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Json(data): Json<IncomeData>,
) -> Result<(StatusCode, Json<Income>), Error> {
    let income = NewIncome::new(&data.name, data.amount, data.date)?;
    let income = state.income_store.create(income, account_id)?;

    Ok((StatusCode::CREATED, Json(income)))
}

/// Handler that overwrites an income.
pub async fn put_income(
    State(state): State<IncomeEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(income_id): Path<DatabaseID>,
    Json(data): Json<IncomeData>,
) -> Result<Json<Income>, Error> {
    let income = NewIncome::new(&data.name, data.amount, data.date)?;

    state
        .income_store
        .update(income_id, account_id, income)
        .map(Json)
}

/// Handler that deletes an income. Deletion is permanent.
pub async fn delete_income(
    State(state): State<IncomeEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(income_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    state.income_store.delete(income_id, account_id)?;

    Ok(StatusCode::NO_CONTENT)
}
