//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{AccountId, Category, CategoryName, DatabaseID},
    stores::CategoryStore,
};

/// Creates and retrieves expense categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    fn create(&self, name: CategoryName, account_id: AccountId) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO category (name, account_id) VALUES (?1, ?2);",
            (name.as_ref(), account_id.as_i64()),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category {
            id,
            name,
            account_id,
        })
    }

    /// Create each category in `names`, in order, within one transaction.
    ///
    /// # Errors
    /// If any insert fails the transaction is rolled back and no
    /// category is created.
    fn create_many(
        &self,
        names: &[CategoryName],
        account_id: AccountId,
    ) -> Result<Vec<Category>, Error> {
        let connection = self.connection.lock().unwrap();
        let transaction = connection.unchecked_transaction()?;

        let mut categories = Vec::with_capacity(names.len());

        {
            let mut statement = transaction
                .prepare("INSERT INTO category (name, account_id) VALUES (?1, ?2) RETURNING id;")?;

            for name in names {
                let id: DatabaseID =
                    statement.query_row((name.as_ref(), account_id.as_i64()), |row| row.get(0))?;

                categories.push(Category {
                    id,
                    name: name.clone(),
                    account_id,
                });
            }
        }

        transaction.commit()?;

        Ok(categories)
    }

    fn get(&self, category_id: DatabaseID, account_id: AccountId) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, account_id FROM category
                 WHERE id = :id AND account_id = :account_id;",
            )?
            .query_row(
                &[(":id", &category_id), (":account_id", &account_id.as_i64())],
                Self::map_row,
            )
            .map_err(|error| error.into())
    }

    fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, account_id FROM category WHERE account_id = :account_id;")?
            .query_map(&[(":account_id", &account_id.as_i64())], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn update_name(
        &self,
        category_id: DatabaseID,
        account_id: AccountId,
        name: CategoryName,
    ) -> Result<Category, Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE category SET name = ?1 WHERE id = ?2 AND account_id = ?3;",
            (name.as_ref(), category_id, account_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(Category {
            id: category_id,
            name,
            account_id,
        })
    }

    fn delete(&self, category_id: DatabaseID, account_id: AccountId) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "DELETE FROM category WHERE id = ?1 AND account_id = ?2;",
            (category_id, account_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                account_id INTEGER NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let account_id = AccountId::new(row.get(offset + 2)?);

        Ok(Category {
            id,
            name,
            account_id,
        })
    }
}
