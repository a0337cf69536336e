//! Implements a SQLite backed session store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{AccountId, CsrfToken, Session, SessionToken},
    stores::SessionStore,
};

/// Persists sessions to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteSessionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSessionStore {
    /// Create a new session store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl SessionStore for SQLiteSessionStore {
    fn create(&self, session: &Session) -> Result<(), Error> {
        self.connection.lock().unwrap().execute(
            "INSERT INTO session (token, account_id, csrf_token, created_at, last_seen_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            (
                session.token.as_str(),
                session.account_id.as_i64(),
                session.csrf_token.as_str(),
                session.created_at,
                session.last_seen_at,
            ),
        )?;

        Ok(())
    }

    fn get(&self, token: &SessionToken) -> Result<Session, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT token, account_id, csrf_token, created_at, last_seen_at FROM session
                 WHERE token = :token;",
            )?
            .query_row(&[(":token", &token.as_str())], Self::map_row)
            .map_err(|error| error.into())
    }

    fn touch(&self, token: &SessionToken, at: OffsetDateTime) -> Result<(), Error> {
        // A concurrent logout may have removed the row; that is fine,
        // the next lookup will fail and the request cycle ends there.
        self.connection.lock().unwrap().execute(
            "UPDATE session SET last_seen_at = ?1 WHERE token = ?2;",
            (at, token.as_str()),
        )?;

        Ok(())
    }

    fn delete(&self, token: &SessionToken) -> Result<(), Error> {
        self.connection
            .lock()
            .unwrap()
            .execute("DELETE FROM session WHERE token = ?1;", (token.as_str(),))?;

        Ok(())
    }
}

impl CreateTable for SQLiteSessionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS session (
                token TEXT PRIMARY KEY,
                account_id INTEGER NOT NULL,
                csrf_token TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_seen_at TEXT NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteSessionStore {
    type ReturnType = Session;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_token: String = row.get(offset)?;
        let raw_csrf_token: String = row.get(offset + 2)?;

        Ok(Session {
            token: SessionToken::new_unchecked(&raw_token),
            account_id: AccountId::new(row.get(offset + 1)?),
            csrf_token: CsrfToken::new_unchecked(&raw_csrf_token),
            created_at: row.get(offset + 3)?,
            last_seen_at: row.get(offset + 4)?,
        })
    }
}

#[cfg(test)]
mod session_store_tests {
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        models::{Session, SessionToken},
        stores::{
            SessionStore,
            sqlite::test_utils::{get_test_connection, insert_test_account},
        },
    };

    use super::SQLiteSessionStore;

    fn get_test_store() -> (SQLiteSessionStore, crate::models::Account) {
        let connection = get_test_connection();
        let account = insert_test_account(connection.clone(), "alice");

        (SQLiteSessionStore::new(connection), account)
    }

    #[test]
    fn create_and_get_session_round_trips() {
        let (store, account) = get_test_store();
        let session = Session::new(account.id);

        store.create(&session).unwrap();
        let selected = store.get(&session.token).unwrap();

        assert_eq!(selected.account_id, session.account_id);
        assert_eq!(selected.csrf_token, session.csrf_token);
    }

    #[test]
    fn get_fails_with_unknown_token() {
        let (store, _account) = get_test_store();

        let result = store.get(&SessionToken::new_unchecked("no-such-token"));

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn touch_moves_the_inactivity_window_forward() {
        let (store, account) = get_test_store();
        let session = Session::new(account.id);
        store.create(&session).unwrap();

        let later = OffsetDateTime::now_utc() + Duration::minutes(10);
        store.touch(&session.token, later).unwrap();

        // Sub-second precision may be truncated by the TEXT encoding.
        let selected = store.get(&session.token).unwrap();
        assert!((selected.last_seen_at - later).abs() < Duration::seconds(1));
    }

    #[test]
    fn delete_removes_the_session() {
        let (store, account) = get_test_store();
        let session = Session::new(account.id);
        store.create(&session).unwrap();

        store.delete(&session.token).unwrap();

        assert_eq!(store.get(&session.token), Err(Error::NotFound));
    }

    #[test]
    fn delete_is_a_no_op_for_a_missing_session() {
        let (store, _account) = get_test_store();

        assert!(store.delete(&SessionToken::new_unchecked("gone")).is_ok());
    }

    #[test]
    fn multiple_sessions_per_account_are_allowed() {
        let (store, account) = get_test_store();
        let first = Session::new(account.id);
        let second = Session::new(account.id);

        store.create(&first).unwrap();
        store.create(&second).unwrap();

        assert!(store.get(&first.token).is_ok());
        assert!(store.get(&second.token).is_ok());
    }
}
