//! This file defines the CRUD route handlers for categories.

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    models::{AccountId, Category, CategoryName, DatabaseID},
    stores::{CategoryStore, sqlite::SQLiteCategoryStore},
};

/// The data sent with a create or rename request.
#[derive(Debug, Deserialize)]
pub struct CategoryData {
    /// The category name to set.
    pub name: String,
}

/// The state needed for the category endpoints.
#[derive(Clone)]
pub struct CategoryEndpointState {
    /// Where categories are persisted.
    pub category_store: SQLiteCategoryStore,
}

impl FromRef<AppState> for CategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// Handler that lists the account's categories.
pub async fn get_categories(
    State(state): State<CategoryEndpointState>,
    Extension(account_id): Extension<AccountId>,
) -> Result<Json<Vec<Category>>, Error> {
    state.category_store.get_by_account(account_id).map(Json)
}

/// Handler that creates a category.
pub async fn post_category(
    State(state): State<CategoryEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Json(data): Json<CategoryData>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let name = CategoryName::new(&data.name)?;
    let category = state.category_store.create(name, account_id)?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler that renames a category.
pub async fn put_category(
    State(state): State<CategoryEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(category_id): Path<DatabaseID>,
    Json(data): Json<CategoryData>,
) -> Result<Json<Category>, Error> {
    let name = CategoryName::new(&data.name)?;

    state
        .category_store
        .update_name(category_id, account_id, name)
        .map(Json)
}

/// Handler that deletes a category.
///
/// Expenses tagged with the category are kept; their category reference
/// is cleared.
pub async fn delete_category(
    State(state): State<CategoryEndpointState>,
    Extension(account_id): Extension<AccountId>,
    Path(category_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    state.category_store.delete(category_id, account_id)?;

    Ok(StatusCode::NO_CONTENT)
}
