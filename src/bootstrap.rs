//! Seeds the categories every new account starts with.
//!
//! Seeding is an explicit step in the registration flow, invoked right
//! after the account row is created, so the all-or-nothing contract is
//! visible at the call site.

use crate::{
    Error,
    models::{AccountId, Category, CategoryName},
    stores::CategoryStore,
};

/// The categories every new account starts with, in creation order.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Housing",
    "Food",
    "Transportation",
    "Health",
    "Entertainment",
];

/// Create the default categories for a freshly created account.
///
/// Must be called exactly once per account, immediately after the
/// account row is created. Either all five categories are created, in
/// order, or none are; on failure the caller is expected to treat the
/// whole account creation as failed.
pub fn seed_default_categories(
    account_id: AccountId,
    categories: &impl CategoryStore,
) -> Result<Vec<Category>, Error> {
    let names: Vec<CategoryName> = DEFAULT_CATEGORIES
        .iter()
        .map(|name| CategoryName::new_unchecked(name))
        .collect();

    categories.create_many(&names, account_id)
}
