//! SQLite backed implementations of the store traits.
//!
//! All stores share a single `Arc<Mutex<Connection>>`; each operation
//! holds the lock for one statement (or one short transaction).

mod account;
mod category;
mod expense;
mod income;
mod session;

pub use account::SQLiteAccountStore;
pub use category::SQLiteCategoryStore;
pub use expense::SQLiteExpenseStore;
pub use income::SQLiteIncomeStore;
pub use session::SQLiteSessionStore;
