//! Defines the store traits that the HTTP handlers and the report
//! aggregator are written against, plus the SQLite implementations.
//!
//! Every operation on category, expense, and income rows takes the
//! owning account's ID and is scoped to it in the query itself, so a
//! row belonging to another account is indistinguishable from a row
//! that does not exist.

mod account;
mod category;
mod expense;
mod income;
mod session;
pub mod sqlite;

pub use account::AccountStore;
pub use category::CategoryStore;
pub use expense::ExpenseStore;
pub use income::IncomeStore;
pub use session::SessionStore;
