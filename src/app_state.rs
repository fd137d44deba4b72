//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    account::AccountController, category::CategoryController, controller::Controller,
    db::RepositoryManager, storage::StorageError, transaction::TransactionController,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The controller for accounts.
    pub accounts: AccountController,

    /// The controller for transactions.
    pub transactions: TransactionController,

    /// The controller for categories and sub-categories.
    pub categories: CategoryController,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will create the tables for every resource if they do not
    /// exist yet.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, StorageError> {
        let manager = RepositoryManager::new(db_connection)?;
        manager.ensure_schema()?;

        Ok(Self {
            accounts: Controller::new(manager.account_store()),
            transactions: Controller::new(manager.transaction_store()),
            categories: CategoryController::new(manager.category_store()),
        })
    }
}

impl FromRef<AppState> for AccountController {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for TransactionController {
    fn from_ref(state: &AppState) -> Self {
        state.transactions.clone()
    }
}

impl FromRef<AppState> for CategoryController {
    fn from_ref(state: &AppState) -> Self {
        state.categories.clone()
    }
}
