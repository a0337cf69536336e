//! Implements a SQLite backed expense store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::Month;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{AccountId, DatabaseID, Expense, NewExpense},
    stores::ExpenseStore,
};

/// Creates, retrieves, and sums expenses to/from a SQLite database.
///
/// Note that because an expense depends on the account and category
/// models, those tables must be set up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new expense store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Check that `category_id` refers to a category owned by `account_id`.
    ///
    /// A category belonging to another account gets the same error as a
    /// category that does not exist.
    fn assert_category_owned(
        connection: &Connection,
        category_id: DatabaseID,
        account_id: AccountId,
    ) -> Result<(), Error> {
        connection
            .prepare("SELECT id FROM category WHERE id = :id AND account_id = :account_id;")?
            .query_row(
                &[(":id", &category_id), (":account_id", &account_id.as_i64())],
                |row| row.get::<_, DatabaseID>(0),
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
                error => error.into(),
            })?;

        Ok(())
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Create a new expense in the database.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `expense.category_id` is set but does not refer to a
    /// category owned by `account_id`, or an [Error::SqlError] if there is some other SQL error.
    fn create(&self, expense: NewExpense, account_id: AccountId) -> Result<Expense, Error> {
        let connection = self.connection.lock().unwrap();

        if let Some(category_id) = expense.category_id {
            Self::assert_category_owned(&connection, category_id, account_id)?;
        }

        let expense = connection
            .prepare(
                "INSERT INTO expense (name, amount, date, category_id, account_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, name, amount, date, category_id, account_id;",
            )?
            .query_row(
                (
                    &expense.name,
                    expense.amount,
                    expense.date,
                    expense.category_id,
                    account_id.as_i64(),
                ),
                Self::map_row,
            )?;

        Ok(expense)
    }

    fn get(&self, expense_id: DatabaseID, account_id: AccountId) -> Result<Expense, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, amount, date, category_id, account_id FROM expense
                 WHERE id = :id AND account_id = :account_id;",
            )?
            .query_row(
                &[(":id", &expense_id), (":account_id", &account_id.as_i64())],
                Self::map_row,
            )
            .map_err(|error| error.into())
    }

    fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Expense>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, amount, date, category_id, account_id FROM expense
                 WHERE account_id = :account_id;",
            )?
            .query_map(&[(":account_id", &account_id.as_i64())], Self::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }

    fn update(
        &self,
        expense_id: DatabaseID,
        account_id: AccountId,
        expense: NewExpense,
    ) -> Result<Expense, Error> {
        let connection = self.connection.lock().unwrap();

        if let Some(category_id) = expense.category_id {
            Self::assert_category_owned(&connection, category_id, account_id)?;
        }

        let rows_affected = connection.execute(
            "UPDATE expense SET name = ?1, amount = ?2, date = ?3, category_id = ?4
             WHERE id = ?5 AND account_id = ?6;",
            (
                &expense.name,
                expense.amount,
                expense.date,
                expense.category_id,
                expense_id,
                account_id.as_i64(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(Expense {
            id: expense_id,
            name: expense.name,
            amount: expense.amount,
            date: expense.date,
            category_id: expense.category_id,
            account_id,
        })
    }

    fn delete(&self, expense_id: DatabaseID, account_id: AccountId) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "DELETE FROM expense WHERE id = ?1 AND account_id = ?2;",
            (expense_id, account_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn sum_by_category(&self, account_id: AccountId) -> Result<Vec<(DatabaseID, f64)>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT category_id, SUM(amount) FROM expense
                 WHERE account_id = :account_id AND category_id IS NOT NULL
                 GROUP BY category_id;",
            )?
            .query_map(&[(":account_id", &account_id.as_i64())], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .map(|maybe_sum| maybe_sum.map_err(|error| error.into()))
            .collect()
    }

    fn sum_uncategorised(&self, account_id: AccountId) -> Result<f64, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT COALESCE(SUM(amount), 0.0) FROM expense
                 WHERE account_id = :account_id AND category_id IS NULL;",
            )?
            .query_row(&[(":account_id", &account_id.as_i64())], |row| row.get(0))
            .map_err(|error| error.into())
    }

    /// Sum expense amounts for the calendar month `month`.
    ///
    /// Matches on the month component only: rows from the same month of
    /// a different year are included.
    fn sum_for_month(&self, account_id: AccountId, month: Month) -> Result<f64, Error> {
        let month_number = i64::from(u8::from(month));

        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT COALESCE(SUM(amount), 0.0) FROM expense
                 WHERE account_id = :account_id
                 AND CAST(strftime('%m', date) AS INTEGER) = :month;",
            )?
            .query_row(
                &[(":account_id", &account_id.as_i64()), (":month", &month_number)],
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteExpenseStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category_id INTEGER,
                account_id INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = Expense;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Expense {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            date: row.get(offset + 3)?,
            category_id: row.get(offset + 4)?,
            account_id: AccountId::new(row.get(offset + 5)?),
        })
    }
}
