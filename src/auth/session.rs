//! The session authenticator: credential verification and the session
//! lifecycle (issue, invalidate).
//!
//! Validation of in-flight requests lives in the middleware module.

use time::Duration;

use crate::{
    Error,
    models::{Account, AccountId, Session, SessionToken},
    password::PasswordHash,
    stores::{AccountStore, SessionStore},
};

/// How long a session may sit idle before it expires.
///
/// The window slides: every validated request moves it forward.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::minutes(30);

/// A bcrypt hash that matches no password anyone will send.
///
/// Verified against when the username is unknown so that the failure
/// path costs the same as a real verification.
const UNKNOWN_USER_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Verify `password` against the account registered under `username`.
///
/// # Errors
///
/// Returns an [Error::InvalidCredentials] if the username is unknown or
/// the password is wrong. The error is identical in both cases and the
/// two paths do the same amount of hashing work, so neither the
/// response nor its timing reveals whether the username exists.
pub fn authenticate(
    username: &str,
    password: &str,
    accounts: &impl AccountStore,
) -> Result<Account, Error> {
    let account = match accounts.get_by_username(username) {
        Ok(account) => account,
        Err(Error::NotFound) => {
            let _ = PasswordHash::new_unchecked(UNKNOWN_USER_HASH).verify(password);
            return Err(Error::InvalidCredentials);
        }
        Err(error) => return Err(error),
    };

    match account.password_hash.verify(password) {
        Ok(true) => Ok(account),
        Ok(false) => Err(Error::InvalidCredentials),
        Err(error) => Err(Error::HashingError(error.to_string())),
    }
}

/// Create and persist a new session for `account_id`.
///
/// Returns the session, whose token pair the caller should hand to the
/// client. Existing sessions for the account are left untouched:
/// concurrent sessions are allowed.
pub fn issue_session(
    account_id: AccountId,
    sessions: &impl SessionStore,
) -> Result<Session, Error> {
    let session = Session::new(account_id);
    sessions.create(&session)?;

    Ok(session)
}

/// Terminate the session addressed by `token`.
///
/// Once removed, the token pair can never validate again. Invalidating
/// a session that is already gone is not an error.
pub fn invalidate_session(token: &SessionToken, sessions: &impl SessionStore) -> Result<(), Error> {
    sessions.delete(token)
}
