//! Defines the session store trait.

use time::OffsetDateTime;

use crate::{
    Error,
    models::{Session, SessionToken},
};

/// Persists server-side sessions, addressed by their opaque token.
///
/// Concurrent requests carrying the same token may race on
/// [SessionStore::touch] and [SessionStore::delete]; last write wins,
/// which is acceptable because the worst case is a request observing a
/// session that another request just logged out.
pub trait SessionStore {
    /// Persist a freshly issued session.
    fn create(&self, session: &Session) -> Result<(), Error>;

    /// Look up a session by its token.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no session with the token exists.
    fn get(&self, token: &SessionToken) -> Result<Session, Error>;

    /// Record that the session passed validation at `at`, sliding its
    /// inactivity window forward.
    fn touch(&self, token: &SessionToken, at: OffsetDateTime) -> Result<(), Error>;

    /// Remove a session. Removing an already-removed session is not an error.
    fn delete(&self, token: &SessionToken) -> Result<(), Error>;
}
