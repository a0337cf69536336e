//! The reporting endpoints: category totals and the month-over-month
//! comparison.
//!
//! Both reports are read-only and scoped to the authenticated account.
//! They query the stores directly on every request; nothing is cached,
//! so results always reflect the latest committed rows.

use axum::extract::FromRef;

use crate::{
    AppState,
    stores::sqlite::{SQLiteCategoryStore, SQLiteExpenseStore, SQLiteIncomeStore},
};

mod category_totals;
mod monthly_comparison;

pub use category_totals::{CategoryTotal, category_totals, get_expenses_by_category};
pub use monthly_comparison::{
    MonthlyComparison, PeriodSummary, get_monthly_comparison, monthly_comparison, percent_change,
};

/// The state needed to build the reports.
#[derive(Clone)]
pub struct ReportState {
    /// Where the account's categories are read from.
    pub category_store: SQLiteCategoryStore,
    /// Where expense sums are read from.
    pub expense_store: SQLiteExpenseStore,
    /// Where income sums are read from.
    pub income_store: SQLiteIncomeStore,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            expense_store: state.expense_store.clone(),
            income_store: state.income_store.clone(),
        }
    }
}
