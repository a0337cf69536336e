//! This file defines the server-side session record and its token types.
//!
//! A session pairs two correlated random tokens: the session token,
//! which travels in an HTTP-only cookie, and the anti-forgery token,
//! which travels in a script-readable cookie and must be echoed back in
//! a request header on state-changing requests (the double-submit
//! pattern).

use sha2::{Digest, Sha256};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::models::AccountId;

/// The opaque token a session record is addressed by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random session token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap a raw token string, e.g. one read back from a cookie.
    pub fn new_unchecked(raw_token: &str) -> Self {
        Self(raw_token.to_string())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The anti-forgery token paired with a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Generate a fresh random anti-forgery token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap a raw token string, e.g. one read back from the database.
    pub fn new_unchecked(raw_token: &str) -> Self {
        Self(raw_token.to_string())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `candidate` matches this token.
    ///
    /// The comparison is done on SHA-256 digests so that it takes the
    /// same time whether the candidate diverges in the first byte or
    /// the last.
    pub fn matches(&self, candidate: &str) -> bool {
        Sha256::digest(self.0.as_bytes()) == Sha256::digest(candidate.as_bytes())
    }
}

/// A server-side session bound to exactly one account.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// The opaque token the session is addressed by.
    pub token: SessionToken,
    /// The account the session authenticates.
    pub account_id: AccountId,
    /// The paired anti-forgery token.
    pub csrf_token: CsrfToken,
    /// When the session was created.
    pub created_at: OffsetDateTime,
    /// When the session last passed validation.
    pub last_seen_at: OffsetDateTime,
}

impl Session {
    /// Create a new session for `account_id` with fresh random tokens.
    pub fn new(account_id: AccountId) -> Self {
        let now = OffsetDateTime::now_utc();

        Self {
            token: SessionToken::generate(),
            account_id,
            csrf_token: CsrfToken::generate(),
            created_at: now,
            last_seen_at: now,
        }
    }

    /// Whether the session has been inactive for longer than `max_idle`.
    pub fn is_expired(&self, now: OffsetDateTime, max_idle: Duration) -> bool {
        self.last_seen_at + max_idle < now
    }
}
