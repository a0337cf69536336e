//! This file defines the route handler for logging out.

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;

use crate::{
    AppState, Error,
    auth::{cookie::clear_session_cookies, session::invalidate_session},
    models::Session,
    stores::sqlite::SQLiteSessionStore,
};

/// The state needed to perform a log-out.
#[derive(Clone)]
pub struct LogOutState {
    /// Where the session to terminate lives.
    pub session_store: SQLiteSessionStore,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session_store: state.session_store.clone(),
        }
    }
}

/// Handler for log-out requests via the POST method.
///
/// Terminates the session and expires both cookies. The old token pair
/// can never be replayed afterwards.
pub async fn post_log_out(
    State(state): State<LogOutState>,
    jar: CookieJar,
    Extension(session): Extension<Session>,
) -> Result<(CookieJar, StatusCode), Error> {
    invalidate_session(&session.token, &state.session_store)?;

    tracing::info!("Account {} logged out.", session.account_id);

    Ok((clear_session_cookies(jar), StatusCode::NO_CONTENT))
}
