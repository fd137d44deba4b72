//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/accounts/{id}', use [format_endpoint].

/// The route for creating and listing accounts.
pub const ACCOUNTS: &str = "/accounts";
/// The route for getting, updating and deleting a single account.
pub const ACCOUNT: &str = "/accounts/{id}";
/// The route for creating and listing transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// Another name for [TRANSACTIONS].
pub const LEDGER: &str = "/ledger";
/// The route for getting, updating and deleting a single transaction.
pub const TRANSACTION: &str = "/transactions/{id}";
/// The route for creating and listing categories.
pub const CATEGORIES: &str = "/categories";
/// The route for adding a sub-category to a category.
pub const SUB_CATEGORIES: &str = "/categories/sub";
/// The route for getting, renaming and deleting a single category.
pub const CATEGORY: &str = "/categories/{name}";
/// The route for deleting a sub-category.
pub const SUB_CATEGORY: &str = "/categories/{category}/{name}";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";

/// Replace the parameter in `endpoint_path` with `parameter`.
///
/// Only the first parameter is replaced.
pub fn format_endpoint(endpoint_path: &str, parameter: &str) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{}{}",
            &endpoint_path[..start],
            parameter,
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}
