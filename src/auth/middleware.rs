//! Authentication middleware that validates sessions and enforces the
//! double-submit anti-forgery check on state-changing routes.

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    auth::cookie::{CSRF_HEADER, get_session_token},
    stores::{SessionStore, sqlite::SQLiteSessionStore},
};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Where sessions are looked up and refreshed.
    pub session_store: SQLiteSessionStore,
    /// How long a session may sit idle before it expires.
    pub session_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session_store: state.session_store.clone(),
            session_duration: state.session_duration,
        }
    }
}

/// Middleware function that checks for a valid session cookie.
///
/// The session's account ID and the session record itself are placed
/// into the request and then the request is executed normally if the
/// session is valid, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function arguments
/// `Extension(account_id): Extension<AccountId>` and
/// `Extension(session): Extension<Session>` to receive the values.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard_internal(state, request, next, false).await
}

/// Middleware function for state-changing routes.
///
/// In addition to the session check performed by [auth_guard], the
/// request must carry the session's anti-forgery token in the
/// `X-XSRF-TOKEN` header. A missing or mismatched header fails the
/// request with a 403 without touching the session, so the client can
/// recover by re-reading the anti-forgery cookie rather than logging in
/// again.
pub async fn auth_guard_csrf(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard_internal(state, request, next, true).await
}

#[inline]
async fn guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    require_csrf: bool,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = CookieJar::from_headers(&parts.headers);

    let token = match get_session_token(&jar) {
        Ok(token) => token,
        Err(error) => return error.into_response(),
    };

    let session = match state.session_store.get(&token) {
        Ok(session) => session,
        // An unknown token and a missing cookie get the same response.
        Err(_) => return Error::Unauthenticated.into_response(),
    };

    let now = OffsetDateTime::now_utc();
    if session.is_expired(now, state.session_duration) {
        if let Err(error) = state.session_store.delete(&token) {
            tracing::warn!("Could not remove expired session: {error}");
        }

        return Error::Unauthenticated.into_response();
    }

    if require_csrf {
        let header_token = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok());

        match header_token {
            Some(candidate) if session.csrf_token.matches(candidate) => {}
            _ => return Error::ForbiddenCsrf.into_response(),
        }
    }

    if let Err(error) = state.session_store.touch(&token, now) {
        // The request is already authenticated; a failed refresh only
        // shortens the session.
        tracing::warn!("Could not refresh session activity: {error}");
    }

    parts.extensions.insert(session.account_id);
    parts.extensions.insert(session);

    next.run(Request::from_parts(parts, body)).await
}

#[cfg(test)]
mod auth_guard_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension, Router, middleware,
        routing::{get, post},
    };
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        auth::{
            COOKIE_SESSION, CSRF_HEADER, DEFAULT_SESSION_DURATION, issue_session,
        },
        db::initialize,
        models::{Account, AccountId, Session},
        stores::{
            SessionStore,
            sqlite::{SQLiteSessionStore, test_utils::insert_test_account},
        },
    };

    use super::{AuthState, auth_guard, auth_guard_csrf};

    const PROTECTED_ROUTE: &str = "/protected";
    const UNSAFE_ROUTE: &str = "/unsafe";

    async fn whoami(Extension(account_id): Extension<AccountId>) -> String {
        account_id.to_string()
    }

    fn get_test_setup(session_duration: Duration) -> (TestServer, AuthState, Account) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));
        let account = insert_test_account(connection.clone(), "alice");

        let state = AuthState {
            session_store: SQLiteSessionStore::new(connection),
            session_duration,
        };

        let safe_routes = Router::new()
            .route(PROTECTED_ROUTE, get(whoami))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));
        let unsafe_routes = Router::new()
            .route(UNSAFE_ROUTE, post(whoami))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_guard_csrf,
            ));
        let app = safe_routes.merge(unsafe_routes).with_state(state.clone());

        let server = TestServer::new(app);

        (server, state, account)
    }

    fn session_cookie(session: &Session) -> Cookie<'static> {
        Cookie::new(COOKIE_SESSION, session.token.as_str().to_owned())
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_session() {
        let (server, state, account) = get_test_setup(DEFAULT_SESSION_DURATION);
        let session = issue_session(account.id, &state.session_store).unwrap();

        let response = server
            .get(PROTECTED_ROUTE)
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_ok();
        response.assert_text(account.id.to_string());
    }

    #[tokio::test]
    async fn get_protected_route_without_cookie_is_unauthorized() {
        let (server, _state, _account) = get_test_setup(DEFAULT_SESSION_DURATION);

        let response = server.get(PROTECTED_ROUTE).await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn get_protected_route_with_unknown_token_is_unauthorized() {
        let (server, _state, _account) = get_test_setup(DEFAULT_SESSION_DURATION);

        let response = server
            .get(PROTECTED_ROUTE)
            .add_cookie(Cookie::new(COOKIE_SESSION, "FOOBAR"))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn expired_session_is_unauthorized_and_removed() {
        let (server, state, account) = get_test_setup(Duration::minutes(30));
        let mut session = Session::new(account.id);
        session.last_seen_at = OffsetDateTime::now_utc() - Duration::hours(2);
        state.session_store.create(&session).unwrap();

        let response = server
            .get(PROTECTED_ROUTE)
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_unauthorized();
        assert!(state.session_store.get(&session.token).is_err());
    }

    #[tokio::test]
    async fn invalidated_session_never_validates_again() {
        let (server, state, account) = get_test_setup(DEFAULT_SESSION_DURATION);
        let session = issue_session(account.id, &state.session_store).unwrap();
        state.session_store.delete(&session.token).unwrap();

        // Even the original, matching anti-forgery token does not help.
        let response = server
            .post(UNSAFE_ROUTE)
            .add_cookie(session_cookie(&session))
            .add_header(CSRF_HEADER, session.csrf_token.as_str())
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn unsafe_route_without_csrf_header_is_forbidden() {
        let (server, state, account) = get_test_setup(DEFAULT_SESSION_DURATION);
        let session = issue_session(account.id, &state.session_store).unwrap();

        let response = server
            .post(UNSAFE_ROUTE)
            .add_cookie(session_cookie(&session))
            .await;

        // 403, not 401: the session itself is fine.
        response.assert_status_forbidden();
        assert!(state.session_store.get(&session.token).is_ok());
    }

    #[tokio::test]
    async fn unsafe_route_with_mismatched_csrf_header_is_forbidden() {
        let (server, state, account) = get_test_setup(DEFAULT_SESSION_DURATION);
        let session = issue_session(account.id, &state.session_store).unwrap();

        let response = server
            .post(UNSAFE_ROUTE)
            .add_cookie(session_cookie(&session))
            .add_header(CSRF_HEADER, "not-the-token")
            .await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn unsafe_route_with_matching_csrf_header_succeeds() {
        let (server, state, account) = get_test_setup(DEFAULT_SESSION_DURATION);
        let session = issue_session(account.id, &state.session_store).unwrap();

        let response = server
            .post(UNSAFE_ROUTE)
            .add_cookie(session_cookie(&session))
            .add_header(CSRF_HEADER, session.csrf_token.as_str())
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn validated_request_slides_the_inactivity_window() {
        let (server, state, account) = get_test_setup(DEFAULT_SESSION_DURATION);
        let mut session = Session::new(account.id);
        session.last_seen_at = OffsetDateTime::now_utc() - Duration::minutes(10);
        state.session_store.create(&session).unwrap();

        server
            .get(PROTECTED_ROUTE)
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_ok();

        let refreshed = state.session_store.get(&session.token).unwrap();
        assert!(refreshed.last_seen_at > session.last_seen_at);
    }
}
