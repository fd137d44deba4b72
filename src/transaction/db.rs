//! SQLite storage for transactions.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    db::SharedConnection,
    storage::{ExceptionTranslator, Operation, SQLiteErrorTranslator, StorageError, Store},
    transaction::Transaction,
};

/// Create the transaction table.
///
/// The account foreign keys do not cascade, so an account cannot be deleted
/// while a transaction refers to it.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id TEXT PRIMARY KEY NOT NULL,
            amount REAL NOT NULL,
            receiver TEXT NOT NULL,
            sender TEXT,
            description TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            FOREIGN KEY(receiver) REFERENCES account(id),
            FOREIGN KEY(sender) REFERENCES account(id)
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_receiver ON \"transaction\"(receiver);
        CREATE INDEX IF NOT EXISTS idx_transaction_sender ON \"transaction\"(sender);",
    )?;

    Ok(())
}

fn map_row_to_transaction(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        receiver: row.get(2)?,
        sender: row.get(3)?,
        description: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore<T = SQLiteErrorTranslator> {
    connection: SharedConnection<T>,
}

impl<T> SQLiteTransactionStore<T> {
    /// Create a transaction store that uses `connection`.
    pub fn new(connection: SharedConnection<T>) -> Self {
        Self { connection }
    }
}

impl<T> Store<Transaction> for SQLiteTransactionStore<T>
where
    T: ExceptionTranslator<rusqlite::Error>,
{
    fn create(&self, transaction: Transaction) -> Result<Transaction, StorageError> {
        self.connection.run(Operation::Write, |connection| {
            connection.execute(
                "INSERT INTO \"transaction\" (id, amount, receiver, sender, description, timestamp)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    transaction.id,
                    transaction.amount,
                    transaction.receiver,
                    transaction.sender,
                    transaction.description,
                    transaction.timestamp
                ],
            )?;

            Ok(transaction)
        })
    }

    fn get(&self, id: &str) -> Result<Transaction, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            connection.query_row(
                "SELECT id, amount, receiver, sender, description, timestamp
                FROM \"transaction\" WHERE id = ?1",
                [id],
                map_row_to_transaction,
            )
        })
    }

    fn get_all(&self) -> Result<Vec<Transaction>, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            connection
                .prepare(
                    "SELECT id, amount, receiver, sender, description, timestamp
                    FROM \"transaction\" ORDER BY rowid",
                )?
                .query_map([], map_row_to_transaction)?
                .collect()
        })
    }

    fn update(&self, transaction: Transaction) -> Result<Transaction, StorageError> {
        self.connection.run(Operation::Write, |connection| {
            let rows_affected = connection.execute(
                "UPDATE \"transaction\"
                SET amount = ?1, receiver = ?2, sender = ?3, description = ?4, timestamp = ?5
                WHERE id = ?6",
                params![
                    transaction.amount,
                    transaction.receiver,
                    transaction.sender,
                    transaction.description,
                    transaction.timestamp,
                    transaction.id
                ],
            )?;

            if rows_affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }

            Ok(transaction)
        })
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.connection.run(Operation::Delete, |connection| {
            let rows_affected =
                connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

            if rows_affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }

            Ok(())
        })
    }

    fn exists(&self, id: &str) -> Result<bool, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            connection
                .query_row("SELECT 1 FROM \"transaction\" WHERE id = ?1", [id], |_| {
                    Ok(())
                })
                .optional()
                .map(|row| row.is_some())
        })
    }
}
