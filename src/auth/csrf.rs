//! This file defines the route handler that re-delivers the
//! anti-forgery token.
//!
//! Clients that lost the readable cookie (for example after restoring a
//! tab) call this instead of logging in again.

use axum::{Extension, http::StatusCode};
use axum_extra::extract::CookieJar;

use crate::{auth::cookie::set_csrf_cookie, models::Session};

/// Handler that refreshes the readable anti-forgery cookie from the
/// caller's session.
pub async fn get_csrf_token(
    jar: CookieJar,
    Extension(session): Extension<Session>,
) -> (CookieJar, StatusCode) {
    (
        set_csrf_cookie(jar, &session.csrf_token),
        StatusCode::NO_CONTENT,
    )
}
