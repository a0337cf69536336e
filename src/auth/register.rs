//! This file defines the route handler for registering a new account.

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    bootstrap::seed_default_categories,
    models::{Account, Username},
    password::PasswordHash,
    stores::{AccountStore, sqlite::{SQLiteAccountStore, SQLiteCategoryStore}},
};

/// The data sent with a registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterData {
    /// The handle to register.
    pub username: String,
    /// The password, in the clear.
    pub password: String,
    /// The password a second time, to catch typos.
    pub password_confirmation: String,
}

/// The state needed to register an account.
#[derive(Clone)]
pub struct RegisterState {
    /// Where the new account is persisted.
    pub account_store: SQLiteAccountStore,
    /// Where the default categories are seeded.
    pub category_store: SQLiteCategoryStore,
    /// The bcrypt cost used to hash the new password.
    pub hash_cost: u32,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            account_store: state.account_store.clone(),
            category_store: state.category_store.clone(),
            hash_cost: state.hash_cost,
        }
    }
}

/// Handler for registration requests via the POST method.
///
/// Creates the account and seeds its default categories. If seeding
/// fails, the account is rolled back so registration fails as a unit
/// and nothing is left half-seeded.
///
/// # Errors
///
/// Returns an:
/// - [Error::InvalidName] if the username is shorter than 3 or longer than 255 characters,
/// - [Error::PasswordMismatch] if the confirmation does not match,
/// - [Error::TooWeak] if the password is too easy to guess,
/// - [Error::DuplicateUsername] if the username is taken.
pub async fn post_register(
    State(state): State<RegisterState>,
    Json(registration): Json<RegisterData>,
) -> Result<(StatusCode, Json<Account>), Error> {
    let username = Username::new(&registration.username)?;

    if registration.password != registration.password_confirmation {
        return Err(Error::PasswordMismatch);
    }

    let password_hash = PasswordHash::from_raw_password(&registration.password, state.hash_cost)?;

    let account = state.account_store.create(username, password_hash)?;

    if let Err(error) = seed_default_categories(account.id, &state.category_store) {
        tracing::error!(
            "Could not seed default categories for account {}: {error}. Rolling back.",
            account.id
        );

        if let Err(rollback_error) = state.account_store.delete(account.id) {
            tracing::error!(
                "Could not roll back account {}: {rollback_error}",
                account.id
            );
        }

        return Err(error);
    }

    tracing::info!("Registered account {}.", account.id);

    Ok((StatusCode::CREATED, Json(account)))
}
