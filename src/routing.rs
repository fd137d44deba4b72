//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    account::{Account, SQLiteAccountStore},
    category::{
        create_category_endpoint, create_sub_category_endpoint, delete_category_endpoint,
        delete_sub_category_endpoint, get_category_endpoint, list_categories_endpoint,
        rename_category_endpoint,
    },
    endpoints,
    handlers::{create_endpoint, delete_endpoint, get_endpoint, list_endpoint, update_endpoint},
    logging::logging_middleware,
    transaction::{SQLiteTransactionStore, Transaction},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let account_routes = Router::new()
        .route(
            endpoints::ACCOUNTS,
            post(create_endpoint::<Account, SQLiteAccountStore>)
                .get(list_endpoint::<Account, SQLiteAccountStore>),
        )
        .route(
            endpoints::ACCOUNT,
            get(get_endpoint::<Account, SQLiteAccountStore>)
                .put(update_endpoint::<Account, SQLiteAccountStore>)
                .delete(delete_endpoint::<Account, SQLiteAccountStore>),
        );

    let transaction_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            post(create_endpoint::<Transaction, SQLiteTransactionStore>)
                .get(list_endpoint::<Transaction, SQLiteTransactionStore>),
        )
        .route(
            endpoints::LEDGER,
            post(create_endpoint::<Transaction, SQLiteTransactionStore>)
                .get(list_endpoint::<Transaction, SQLiteTransactionStore>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_endpoint::<Transaction, SQLiteTransactionStore>)
                .put(update_endpoint::<Transaction, SQLiteTransactionStore>)
                .delete(delete_endpoint::<Transaction, SQLiteTransactionStore>),
        );

    // The static sub-category route wins over `{name}`, so "sub" is rejected
    // as a category name.
    let category_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            post(create_category_endpoint).get(list_categories_endpoint),
        )
        .route(endpoints::SUB_CATEGORIES, post(create_sub_category_endpoint))
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(rename_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(endpoints::SUB_CATEGORY, delete(delete_sub_category_endpoint));

    account_routes
        .merge(transaction_routes)
        .merge(category_routes)
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> &'static str {
    "ok"
}

async fn get_404_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
