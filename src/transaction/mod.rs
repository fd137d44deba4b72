//! Transactions: money paid into an account or moved between accounts.

mod core;
mod db;

pub use core::{Transaction, validate_transaction};
pub use db::{SQLiteTransactionStore, create_transaction_table};

use crate::controller::Controller;

/// The controller for transactions stored in SQLite.
pub type TransactionController = Controller<Transaction, SQLiteTransactionStore>;
