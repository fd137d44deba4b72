//! SQLite storage for accounts.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    account::Account,
    db::SharedConnection,
    storage::{ExceptionTranslator, Operation, SQLiteErrorTranslator, StorageError, Store},
};

/// Create the account table.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            initial_balance REAL NOT NULL,
            start_timestamp TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        initial_balance: row.get(2)?,
        start_timestamp: row.get(3)?,
    })
}

/// Stores accounts in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteAccountStore<T = SQLiteErrorTranslator> {
    connection: SharedConnection<T>,
}

impl<T> SQLiteAccountStore<T> {
    /// Create an account store that uses `connection`.
    pub fn new(connection: SharedConnection<T>) -> Self {
        Self { connection }
    }
}

impl<T> Store<Account> for SQLiteAccountStore<T>
where
    T: ExceptionTranslator<rusqlite::Error>,
{
    fn create(&self, account: Account) -> Result<Account, StorageError> {
        self.connection.run(Operation::Write, |connection| {
            connection.execute(
                "INSERT INTO account (id, name, initial_balance, start_timestamp)
                VALUES (?1, ?2, ?3, ?4)",
                params![
                    account.id,
                    account.name,
                    account.initial_balance,
                    account.start_timestamp
                ],
            )?;

            Ok(account)
        })
    }

    fn get(&self, id: &str) -> Result<Account, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            connection.query_row(
                "SELECT id, name, initial_balance, start_timestamp FROM account WHERE id = ?1",
                [id],
                map_row_to_account,
            )
        })
    }

    fn get_all(&self) -> Result<Vec<Account>, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            connection
                .prepare(
                    "SELECT id, name, initial_balance, start_timestamp FROM account ORDER BY rowid",
                )?
                .query_map([], map_row_to_account)?
                .collect()
        })
    }

    fn update(&self, account: Account) -> Result<Account, StorageError> {
        self.connection.run(Operation::Write, |connection| {
            let rows_affected = connection.execute(
                "UPDATE account
                SET name = ?1, initial_balance = ?2, start_timestamp = ?3
                WHERE id = ?4",
                params![
                    account.name,
                    account.initial_balance,
                    account.start_timestamp,
                    account.id
                ],
            )?;

            if rows_affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }

            Ok(account)
        })
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.connection.run(Operation::Delete, |connection| {
            let rows_affected = connection.execute("DELETE FROM account WHERE id = ?1", [id])?;

            if rows_affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }

            Ok(())
        })
    }

    fn exists(&self, id: &str) -> Result<bool, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            connection
                .query_row("SELECT 1 FROM account WHERE id = ?1", [id], |_| Ok(()))
                .optional()
                .map(|row| row.is_some())
        })
    }
}
