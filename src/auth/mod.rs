//! Session authentication for the JSON API.
//!
//! A successful log-in creates a server-side session addressed by an
//! opaque token. The token travels back to the client in an HTTP-only
//! cookie, and the session's paired anti-forgery token travels in a
//! script-readable cookie. Safe requests need only a valid session;
//! state-changing requests must additionally echo the anti-forgery
//! token in a request header (the double-submit pattern).

mod cookie;
mod csrf;
mod log_in;
mod log_out;
mod middleware;
mod register;
mod session;

pub use cookie::{
    COOKIE_CSRF, COOKIE_SESSION, CSRF_HEADER, clear_session_cookies, set_csrf_cookie,
    set_session_cookies,
};
pub use csrf::get_csrf_token;
pub use log_in::{LogInData, post_log_in};
pub use log_out::post_log_out;
pub use middleware::{AuthState, auth_guard, auth_guard_csrf};
pub use register::{RegisterData, post_register};
pub use session::{
    DEFAULT_SESSION_DURATION, authenticate, invalidate_session, issue_session,
};
