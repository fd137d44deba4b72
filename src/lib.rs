//! A personal-finance ledger served as a JSON HTTP API.
//!
//! The ledger keeps accounts, the transactions between them and the
//! categories used to group expenses and income. Every change is validated
//! before it reaches the database, and database constraint violations are
//! reported to the client as the same coded errors that validation produces.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod category;
mod controller;
mod db;
mod endpoints;
mod handlers;
mod id;
mod logging;
mod resource;
mod routing;
mod status;
mod storage;
mod transaction;
mod validation;

pub use account::{
    Account, AccountController, MAX_ACCOUNT_NAME_LENGTH, SQLiteAccountStore, create_account_table,
    validate_account,
};
pub use app_state::AppState;
pub use category::{
    Category, CategoryController, CategoryStore, MAX_CATEGORY_NAME_LENGTH, RESERVED_CATEGORY_NAMES,
    RenameCategory, SQLiteCategoryStore, SubCategory, create_category_tables, validate_category,
    validate_category_name, validate_sub_category,
};
pub use controller::Controller;
pub use db::{RepositoryManager, SharedConnection};
pub use endpoints::format_endpoint;
pub use id::{ID_LENGTH, generate_id, validate_id};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use resource::Resource;
pub use routing::build_router;
pub use status::{aggregate_status, status_for};
pub use storage::{ExceptionTranslator, Operation, SQLiteErrorTranslator, StorageError, Store};
pub use transaction::{
    SQLiteTransactionStore, Transaction, TransactionController, create_transaction_table,
    validate_transaction,
};
pub use validation::{ErrorBody, ResourceKind, ValidationError, ValidationFailure};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request was rejected, either by validation or by a database
    /// constraint.
    ///
    /// The client can fix these errors by changing the request.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// An unexpected error from the database.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("an unexpected storage error occurred: {0}")]
    Storage(String),
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Error::Validation(error.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(failure) => {
                (aggregate_status(failure.errors()), Json(failure)).into_response()
            }
            Error::Storage(error) => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details.",
                )
                    .into_response()
            }
        }
    }
}
