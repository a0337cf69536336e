//! This file defines the route handler for log-in requests.
//! The session module handles the lower level credential and session logic.

use axum::{Json, extract::{FromRef, State}};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::{
        cookie::set_session_cookies,
        session::{authenticate, issue_session},
    },
    models::Account,
    stores::sqlite::{SQLiteAccountStore, SQLiteSessionStore},
};

/// The credentials sent with a log-in request.
#[derive(Debug, Deserialize)]
pub struct LogInData {
    /// The account's handle.
    pub username: String,
    /// The account's password, in the clear.
    pub password: String,
}

/// The state needed to perform a log-in.
#[derive(Clone)]
pub struct LogInState {
    /// Where accounts are looked up.
    pub account_store: SQLiteAccountStore,
    /// Where new sessions are persisted.
    pub session_store: SQLiteSessionStore,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            account_store: state.account_store.clone(),
            session_store: state.session_store.clone(),
        }
    }
}

/// Handler for log-in requests via the POST method.
///
/// On success a new session is issued, its token pair is set as
/// cookies, and the account payload is returned.
///
/// # Errors
///
/// Returns an [Error::InvalidCredentials] if the username or password
/// is wrong, without saying which.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: CookieJar,
    Json(credentials): Json<LogInData>,
) -> Result<(CookieJar, Json<Account>), Error> {
    let account = authenticate(
        &credentials.username,
        &credentials.password,
        &state.account_store,
    )?;

    let session = issue_session(account.id, &state.session_store)?;
    let jar = set_session_cookies(jar, &session);

    tracing::info!("Account {} logged in.", account.id);

    Ok((jar, Json(account)))
}
