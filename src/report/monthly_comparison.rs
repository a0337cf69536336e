//! The month-over-month comparison report: expense, income, and revenue
//! totals for the current and previous calendar month, with percentage
//! changes.

use axum::{Extension, Json, extract::State};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::AccountId,
    report::ReportState,
    stores::{ExpenseStore, IncomeStore},
};

/// The totals for one calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PeriodSummary {
    /// Total expenses for the period.
    pub expenses: f64,
    /// Total income for the period.
    pub income: f64,
    /// Income minus expenses.
    pub revenue: f64,
}

impl PeriodSummary {
    fn new(expenses: f64, income: f64) -> Self {
        Self {
            expenses,
            income,
            revenue: income - expenses,
        }
    }
}

/// The month-over-month comparison report.
#[derive(Debug, PartialEq, Serialize)]
pub struct MonthlyComparison {
    /// Totals for the current calendar month.
    pub current: PeriodSummary,
    /// Totals for the previous calendar month.
    pub previous: PeriodSummary,
    /// Percentage change from previous to current, per figure.
    ///
    /// The revenue change is computed from the raw revenue totals, not
    /// from the expense and income changes.
    pub changes: PeriodSummary,
}

/// The percentage change from `previous` to `current`, rounded to two
/// decimals, half away from zero.
///
/// When `previous` is zero the quotient is undefined, so by policy the
/// change is 100 when `current` is positive and 0 otherwise.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }

    round_to_two(((current - previous) / previous) * 100.0)
}

fn round_to_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the comparison report for the calendar month of `today` versus
/// the month before it.
///
/// Rows are matched by month component only, the way the sums are
/// stored: a request made in January compares against December rows of
/// every year, not just the one that just ended.
pub fn monthly_comparison(
    account_id: AccountId,
    today: Date,
    expenses: &impl ExpenseStore,
    incomes: &impl IncomeStore,
) -> Result<MonthlyComparison, Error> {
    let current_month = today.month();
    let previous_month = current_month.previous();

    let current = PeriodSummary::new(
        expenses.sum_for_month(account_id, current_month)?,
        incomes.sum_for_month(account_id, current_month)?,
    );
    let previous = PeriodSummary::new(
        expenses.sum_for_month(account_id, previous_month)?,
        incomes.sum_for_month(account_id, previous_month)?,
    );

    let changes = PeriodSummary {
        expenses: percent_change(previous.expenses, current.expenses),
        income: percent_change(previous.income, current.income),
        revenue: percent_change(previous.revenue, current.revenue),
    };

    Ok(MonthlyComparison {
        current,
        previous,
        changes,
    })
}

/// Handler for the monthly comparison report.
///
/// The month boundary follows the server's local clock, falling back to
/// UTC when the local offset cannot be determined.
pub async fn get_monthly_comparison(
    State(state): State<ReportState>,
    Extension(account_id): Extension<AccountId>,
) -> Result<Json<MonthlyComparison>, Error> {
    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();

    monthly_comparison(
        account_id,
        today,
        &state.expense_store,
        &state.income_store,
    )
    .map(Json)
}

#[cfg(test)]
mod percent_change_tests {
    use super::percent_change;

    #[test]
    fn zero_previous_and_zero_current_is_zero() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn zero_previous_and_positive_current_is_one_hundred() {
        assert_eq!(percent_change(0.0, 50.0), 100.0);
    }

    #[test]
    fn growth_is_positive() {
        assert_eq!(percent_change(100.0, 150.0), 50.0);
    }

    #[test]
    fn decline_is_negative() {
        assert_eq!(percent_change(200.0, 100.0), -50.0);
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        // 1/3 down is -66.666..., which rounds half away from zero.
        assert_eq!(percent_change(3.0, 1.0), -66.67);
        assert_eq!(percent_change(3.0, 4.0), 33.33);
    }

    #[test]
    fn zero_previous_and_negative_current_is_zero() {
        // Only revenue can go negative; the zero-previous rule still
        // reports 0 rather than a made-up decline.
        assert_eq!(percent_change(0.0, -25.0), 0.0);
    }
}

#[cfg(test)]
mod monthly_comparison_tests {
    use time::macros::date;

    use crate::{
        models::{Account, NewExpense, NewIncome},
        stores::{
            ExpenseStore, IncomeStore,
            sqlite::{
                SQLiteExpenseStore, SQLiteIncomeStore,
                test_utils::{get_test_connection, insert_test_account},
            },
        },
    };

    use super::{PeriodSummary, monthly_comparison};

    fn get_test_setup() -> (SQLiteExpenseStore, SQLiteIncomeStore, Account) {
        let connection = get_test_connection();
        let account = insert_test_account(connection.clone(), "alice");

        (
            SQLiteExpenseStore::new(connection.clone()),
            SQLiteIncomeStore::new(connection),
            account,
        )
    }

    #[test]
    fn compares_the_current_month_to_the_previous_month() {
        let (expenses, incomes, account) = get_test_setup();

        // June, the "current" month.
        expenses
            .create(
                NewExpense::new("Groceries", 120.0, date!(2025 - 06 - 10), None).unwrap(),
                account.id,
            )
            .unwrap();
        incomes
            .create(
                NewIncome::new("Salary", 200.0, date!(2025 - 06 - 01)).unwrap(),
                account.id,
            )
            .unwrap();

        // May, the "previous" month.
        expenses
            .create(
                NewExpense::new("Groceries", 50.0, date!(2025 - 05 - 20), None).unwrap(),
                account.id,
            )
            .unwrap();
        incomes
            .create(
                NewIncome::new("Salary", 100.0, date!(2025 - 05 - 01)).unwrap(),
                account.id,
            )
            .unwrap();

        let report =
            monthly_comparison(account.id, date!(2025 - 06 - 15), &expenses, &incomes).unwrap();

        assert_eq!(
            report.current,
            PeriodSummary {
                expenses: 120.0,
                income: 200.0,
                revenue: 80.0,
            }
        );
        assert_eq!(
            report.previous,
            PeriodSummary {
                expenses: 50.0,
                income: 100.0,
                revenue: 50.0,
            }
        );
        assert_eq!(
            report.changes,
            PeriodSummary {
                expenses: 140.0,
                income: 100.0,
                revenue: 60.0,
            }
        );
    }

    #[test]
    fn revenue_change_is_computed_from_the_raw_revenue_totals() {
        let (expenses, incomes, account) = get_test_setup();

        // Previous month revenue: 100 - 60 = 40.
        incomes
            .create(
                NewIncome::new("Salary", 100.0, date!(2025 - 05 - 01)).unwrap(),
                account.id,
            )
            .unwrap();
        expenses
            .create(
                NewExpense::new("Rent", 60.0, date!(2025 - 05 - 02), None).unwrap(),
                account.id,
            )
            .unwrap();

        // Current month revenue: 90 - 80 = 10.
        incomes
            .create(
                NewIncome::new("Salary", 90.0, date!(2025 - 06 - 01)).unwrap(),
                account.id,
            )
            .unwrap();
        expenses
            .create(
                NewExpense::new("Rent", 80.0, date!(2025 - 06 - 02), None).unwrap(),
                account.id,
            )
            .unwrap();

        let report =
            monthly_comparison(account.id, date!(2025 - 06 - 15), &expenses, &incomes).unwrap();

        // (10 - 40) / 40 * 100.
        assert_eq!(report.changes.revenue, -75.0);
    }

    #[test]
    fn empty_ledger_reports_all_zeroes() {
        let (expenses, incomes, account) = get_test_setup();

        let report =
            monthly_comparison(account.id, date!(2025 - 06 - 15), &expenses, &incomes).unwrap();

        let zero = PeriodSummary {
            expenses: 0.0,
            income: 0.0,
            revenue: 0.0,
        };
        assert_eq!(report.current, zero);
        assert_eq!(report.previous, zero);
        assert_eq!(report.changes, zero);
    }

    #[test]
    fn january_compares_against_december() {
        let (expenses, incomes, account) = get_test_setup();

        expenses
            .create(
                NewExpense::new("Sales shopping", 30.0, date!(2025 - 01 - 05), None).unwrap(),
                account.id,
            )
            .unwrap();
        expenses
            .create(
                NewExpense::new("Presents", 90.0, date!(2024 - 12 - 20), None).unwrap(),
                account.id,
            )
            .unwrap();

        let report =
            monthly_comparison(account.id, date!(2025 - 01 - 10), &expenses, &incomes).unwrap();

        assert_eq!(report.current.expenses, 30.0);
        assert_eq!(report.previous.expenses, 90.0);
    }

    #[test]
    fn month_matching_ignores_the_year_entirely() {
        // The sums match rows by month component only, so December rows
        // from years past are folded into the "previous month" figure.
        // This pins the behavior down rather than assuming it away.
        let (expenses, incomes, account) = get_test_setup();

        expenses
            .create(
                NewExpense::new("Presents", 90.0, date!(2024 - 12 - 20), None).unwrap(),
                account.id,
            )
            .unwrap();
        expenses
            .create(
                NewExpense::new("Older presents", 10.0, date!(2020 - 12 - 20), None).unwrap(),
                account.id,
            )
            .unwrap();

        let report =
            monthly_comparison(account.id, date!(2025 - 01 - 10), &expenses, &incomes).unwrap();

        assert_eq!(report.previous.expenses, 100.0);
    }
}
