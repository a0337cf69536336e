//! Implements a SQLite backed income store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::Month;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{AccountId, DatabaseID, Income, NewIncome},
    stores::IncomeStore,
};

/// Creates, retrieves, and sums incomes to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteIncomeStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteIncomeStore {
    /// Create a new income store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl IncomeStore for SQLiteIncomeStore {
    fn create(&self, income: NewIncome, account_id: AccountId) -> Result<Income, Error> {
        let income = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO income (name, amount, date, account_id)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, name, amount, date, account_id;",
            )?
            .query_row(
                (&income.name, income.amount, income.date, account_id.as_i64()),
                Self::map_row,
            )?;

        Ok(income)
    }

    fn get(&self, income_id: DatabaseID, account_id: AccountId) -> Result<Income, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, amount, date, account_id FROM income
                 WHERE id = :id AND account_id = :account_id;",
            )?
            .query_row(
                &[(":id", &income_id), (":account_id", &account_id.as_i64())],
                Self::map_row,
            )
            .map_err(|error| error.into())
    }

    fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Income>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, amount, date, account_id FROM income
                 WHERE account_id = :account_id;",
            )?
            .query_map(&[(":account_id", &account_id.as_i64())], Self::map_row)?
            .map(|maybe_income| maybe_income.map_err(|error| error.into()))
            .collect()
    }

    fn update(
        &self,
        income_id: DatabaseID,
        account_id: AccountId,
        income: NewIncome,
    ) -> Result<Income, Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE income SET name = ?1, amount = ?2, date = ?3
             WHERE id = ?4 AND account_id = ?5;",
            (
                &income.name,
                income.amount,
                income.date,
                income_id,
                account_id.as_i64(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(Income {
            id: income_id,
            name: income.name,
            amount: income.amount,
            date: income.date,
            account_id,
        })
    }

    fn delete(&self, income_id: DatabaseID, account_id: AccountId) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "DELETE FROM income WHERE id = ?1 AND account_id = ?2;",
            (income_id, account_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Sum income amounts for the calendar month `month`.
    ///
    /// Matches on the month component only: rows from the same month of
    /// a different year are included.
    fn sum_for_month(&self, account_id: AccountId, month: Month) -> Result<f64, Error> {
        let month_number = i64::from(u8::from(month));

        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT COALESCE(SUM(amount), 0.0) FROM income
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

impl CreateTable for SQLiteIncomeStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS income (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                account_id INTEGER NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteIncomeStore {
    type ReturnType = Income;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Income {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            date: row.get(offset + 3)?,
            account_id: AccountId::new(row.get(offset + 4)?),
        })
    }
}
