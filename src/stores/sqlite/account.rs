//! Implements a SQLite backed account store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Account, AccountId, Username},
    password::PasswordHash,
    stores::AccountStore,
};

/// Creates and retrieves accounts to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteAccountStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteAccountStore {
    /// Create a new account store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl AccountStore for SQLiteAccountStore {
    /// Create an account in the database.
    ///
    /// # Errors
    /// Returns an [Error::DuplicateUsername] if the username is taken, or an [Error::SqlError] if
    /// there is some other SQL error.
    fn create(&self, username: Username, password_hash: PasswordHash) -> Result<Account, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO account (username, password) VALUES (?1, ?2);",
            (username.as_ref(), password_hash.to_string()),
        )?;

        let id = AccountId::new(connection.last_insert_rowid());

        Ok(Account {
            id,
            username,
            password_hash,
        })
    }

    fn get(&self, id: AccountId) -> Result<Account, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, username, password FROM account WHERE id = :id;")?
            .query_row(&[(":id", &id.as_i64())], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Look up an account by its exact username.
    ///
    /// The `username` column uses SQLite's default BINARY collation, so
    /// the match is case-sensitive.
    fn get_by_username(&self, username: &str) -> Result<Account, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, username, password FROM account WHERE username = :username;")?
            .query_row(&[(":username", &username)], Self::map_row)
            .map_err(|error| error.into())
    }

    fn delete(&self, id: AccountId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM account WHERE id = ?1;", (id.as_i64(),))?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteAccountStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS account (
                id INTEGER PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteAccountStore {
    type ReturnType = Account;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = AccountId::new(row.get(offset)?);

        let raw_username: String = row.get(offset + 1)?;
        let username = Username::new_unchecked(&raw_username);

        let raw_password_hash: String = row.get(offset + 2)?;
        let password_hash = PasswordHash::new_unchecked(&raw_password_hash);

        Ok(Account {
            id,
            username,
            password_hash,
        })
    }
}
