//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::Duration;

use crate::{
    Error,
    auth::DEFAULT_SESSION_DURATION,
    db::initialize,
    password::PasswordHash,
    stores::sqlite::{
        SQLiteAccountStore, SQLiteCategoryStore, SQLiteExpenseStore, SQLiteIncomeStore,
        SQLiteSessionStore,
    },
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store for registered accounts.
    pub account_store: SQLiteAccountStore,
    /// The store for expense categories.
    pub category_store: SQLiteCategoryStore,
    /// The store for expenses.
    pub expense_store: SQLiteExpenseStore,
    /// The store for incomes.
    pub income_store: SQLiteIncomeStore,
    /// The store for server-side sessions.
    pub session_store: SQLiteSessionStore,
    /// How long a session may sit idle before it expires.
    pub session_duration: Duration,
    /// The bcrypt cost used when hashing new passwords.
    pub hash_cost: u32,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            account_store: SQLiteAccountStore::new(connection.clone()),
            category_store: SQLiteCategoryStore::new(connection.clone()),
            expense_store: SQLiteExpenseStore::new(connection.clone()),
            income_store: SQLiteIncomeStore::new(connection.clone()),
            session_store: SQLiteSessionStore::new(connection),
            session_duration: DEFAULT_SESSION_DURATION,
            hash_cost: PasswordHash::DEFAULT_COST,
        })
    }
}
