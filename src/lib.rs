//! Fiscus is a personal finance tracker: record incomes and expenses,
//! tag expenses with categories, and view aggregated reports.
//!
//! This library provides a JSON REST API with cookie-session
//! authentication and double-submit CSRF protection.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod account;
mod app_state;
pub mod auth;
pub mod bootstrap;
mod category;
pub mod db;
mod endpoints;
mod expense;
mod income;
pub mod models;
mod password;
pub mod report;
mod routing;
pub mod stores;

pub use app_state::AppState;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The combination of username and password did not match a
    /// registered account.
    ///
    /// This error intentionally does not say whether the username
    /// exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The request did not carry a valid, unexpired session token.
    /// The client should log in again.
    #[error("authentication required")]
    Unauthenticated,

    /// The anti-forgery token was missing or did not match the
    /// session's token on a state-changing request.
    ///
    /// The session itself is still valid. The client should fetch a
    /// fresh anti-forgery token and retry once.
    #[error("anti-forgery token missing or invalid")]
    ForbiddenCsrf,

    /// The requested row does not exist or belongs to another account.
    ///
    /// The two causes are indistinguishable on purpose so that the
    /// existence of other accounts' data is never revealed.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A name field failed validation. The message says which field
    /// and why.
    #[error("{0}")]
    InvalidName(String),

    /// A negative or non-finite amount was supplied.
    #[error("{0} is not a valid amount, expected a non-negative number")]
    InvalidAmount(f64),

    /// The password and its confirmation did not match during
    /// registration.
    #[error("the password and its confirmation do not match")]
    PasswordMismatch,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The username is already registered.
    #[error("the username is already taken")]
    DuplicateUsername,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the
    /// server, never sent to the client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("account.username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidCredentials | Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::ForbiddenCsrf => StatusCode::FORBIDDEN,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::DuplicateUsername => StatusCode::CONFLICT,
            Error::InvalidName(_)
            | Error::InvalidAmount(_)
            | Error::PasswordMismatch
            | Error::TooWeak(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::HashingError(_) | Error::SqlError(_) => {
                tracing::error!("An unexpected error occurred: {self}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "an internal error occurred" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
