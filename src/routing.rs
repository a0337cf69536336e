//! Application router configuration with protected and unprotected route definitions.
//!
//! Routes come in three groups: unprotected (register, log-in),
//! protected reads behind the session guard, and protected writes
//! behind the session guard plus the anti-forgery check.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    account::get_current_account,
    auth::{
        auth_guard, auth_guard_csrf, get_csrf_token, post_log_in, post_log_out, post_register,
    },
    category::{delete_category, get_categories, post_category, put_category},
    endpoints,
    expense::{delete_expense, get_expense, get_expenses, post_expense, put_expense},
    income::{delete_income, get_income, get_incomes, post_income, put_income},
    report::{get_expenses_by_category, get_monthly_comparison},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::REGISTER, post(post_register))
        .route(endpoints::LOG_IN, post(post_log_in));

    let protected_read_routes = Router::new()
        .route(endpoints::USER, get(get_current_account))
        .route(endpoints::CSRF, get(get_csrf_token))
        .route(endpoints::CATEGORIES, get(get_categories))
        .route(endpoints::EXPENSES, get(get_expenses))
        .route(endpoints::EXPENSE, get(get_expense))
        .route(endpoints::INCOMES, get(get_incomes))
        .route(endpoints::INCOME, get(get_income))
        .route(
            endpoints::EXPENSES_BY_CATEGORY,
            get(get_expenses_by_category),
        )
        .route(endpoints::MONTHLY_COMPARISON, get(get_monthly_comparison))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // State-changing routes additionally require the anti-forgery header.
    let protected_write_routes = Router::new()
        .route(endpoints::LOG_OUT, post(post_log_out))
        .route(endpoints::CATEGORIES, post(post_category))
        .route(endpoints::CATEGORY, put(put_category))
        .route(endpoints::CATEGORY, delete(delete_category))
        .route(endpoints::EXPENSES, post(post_expense))
        .route(endpoints::EXPENSE, put(put_expense))
        .route(endpoints::EXPENSE, delete(delete_expense))
        .route(endpoints::INCOMES, post(post_income))
        .route(endpoints::INCOME, put(put_income))
        .route(endpoints::INCOME, delete(delete_income))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_guard_csrf,
        ));

    unprotected_routes
        .merge(protected_read_routes)
        .merge(protected_write_routes)
        .with_state(state)
}
