//! This file defines the route handler for fetching the authenticated
//! account.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error,
    models::{Account, AccountId},
    stores::{AccountStore, sqlite::SQLiteAccountStore},
};

/// The state needed to fetch the authenticated account.
#[derive(Clone)]
pub struct CurrentAccountState {
    /// Where accounts are read from.
    pub account_store: SQLiteAccountStore,
}

impl FromRef<AppState> for CurrentAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            account_store: state.account_store.clone(),
        }
    }
}

/// Handler that returns the account the session authenticates.
///
/// The payload carries the ID and username; the password hash is never
/// serialized.
pub async fn get_current_account(
    State(state): State<CurrentAccountState>,
    Extension(account_id): Extension<AccountId>,
) -> Result<Json<Account>, Error> {
    state.account_store.get(account_id).map(Json)
}
