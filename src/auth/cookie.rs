//! Defines functions for moving session and anti-forgery tokens in and
//! out of cookies.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    models::{CsrfToken, Session, SessionToken},
};

/// The cookie holding the opaque session token. HTTP-only.
pub const COOKIE_SESSION: &str = "fiscus_session";
/// The cookie holding the anti-forgery token. Readable by client script.
pub const COOKIE_CSRF: &str = "XSRF-TOKEN";
/// The header that must echo the anti-forgery token on unsafe requests.
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Add the session and anti-forgery cookies for `session` to the jar.
///
/// The session cookie is HTTP-only; the anti-forgery cookie is left
/// readable so client script can copy its value into [CSRF_HEADER].
/// Neither cookie carries an expiry: the server-side inactivity window
/// is authoritative.
pub fn set_session_cookies(jar: CookieJar, session: &Session) -> CookieJar {
    let jar = jar.add(
        Cookie::build((COOKIE_SESSION, session.token.as_str().to_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    );

    set_csrf_cookie(jar, &session.csrf_token)
}

/// Add or refresh the readable anti-forgery cookie.
pub fn set_csrf_cookie(jar: CookieJar, csrf_token: &CsrfToken) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_CSRF, csrf_token.as_str().to_owned()))
            .path("/")
            .http_only(false)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Set both cookies to an invalid value and set their max age to zero, which should delete them
/// on the client side.
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
    .add(
        Cookie::build((COOKIE_CSRF, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(false)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Read the session token from the request's cookies.
///
/// # Errors
/// Returns an [Error::Unauthenticated] if the session cookie is missing.
pub fn get_session_token(jar: &CookieJar) -> Result<SessionToken, Error> {
    match jar.get(COOKIE_SESSION) {
        Some(cookie) => Ok(SessionToken::new_unchecked(cookie.value_trimmed())),
        None => Err(Error::Unauthenticated),
    }
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::CookieJar;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        models::{AccountId, Session},
    };

    use super::{
        COOKIE_CSRF, COOKIE_SESSION, clear_session_cookies, get_session_token,
        set_session_cookies,
    };

    #[test]
    fn set_session_cookies_sets_both_tokens() {
        let session = Session::new(AccountId::new(1));

        let jar = set_session_cookies(CookieJar::new(), &session);

        let session_cookie = jar.get(COOKIE_SESSION).unwrap();
        assert_eq!(session_cookie.value(), session.token.as_str());
        assert_eq!(session_cookie.http_only(), Some(true));

        let csrf_cookie = jar.get(COOKIE_CSRF).unwrap();
        assert_eq!(csrf_cookie.value(), session.csrf_token.as_str());
        // Client script has to be able to read this one.
        assert_eq!(csrf_cookie.http_only(), Some(false));
    }

    #[test]
    fn get_session_token_round_trips() {
        let session = Session::new(AccountId::new(1));
        let jar = set_session_cookies(CookieJar::new(), &session);

        let token = get_session_token(&jar).unwrap();

        assert_eq!(token, session.token);
    }

    #[test]
    fn get_session_token_fails_on_empty_jar() {
        let result = get_session_token(&CookieJar::new());

        assert_eq!(result, Err(Error::Unauthenticated));
    }

    #[test]
    fn clear_session_cookies_expires_both_cookies() {
        let session = Session::new(AccountId::new(1));
        let jar = set_session_cookies(CookieJar::new(), &session);

        let jar = clear_session_cookies(jar);

        for name in [COOKIE_SESSION, COOKIE_CSRF] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "deleted");
            assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        }
    }
}
