//! Accounts: where money is kept.

mod core;
mod db;

pub use core::{Account, MAX_ACCOUNT_NAME_LENGTH, validate_account};
pub use db::{SQLiteAccountStore, create_account_table};

use crate::controller::Controller;

/// The controller for accounts stored in SQLite.
pub type AccountController = Controller<Account, SQLiteAccountStore>;
