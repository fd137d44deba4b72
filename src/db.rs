//! Database setup and the shared SQLite connection used by the stores.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use rusqlite::{Connection, TransactionBehavior};

use crate::{
    account::{SQLiteAccountStore, create_account_table},
    category::{SQLiteCategoryStore, create_category_tables},
    storage::{ExceptionTranslator, Operation, SQLiteErrorTranslator, StorageError},
    transaction::{SQLiteTransactionStore, create_transaction_table},
};

/// A SQLite connection shared between stores, plus the translator for its errors.
#[derive(Debug, Clone)]
pub struct SharedConnection<T = SQLiteErrorTranslator> {
    connection: Arc<Mutex<Connection>>,
    translator: T,
}

impl<T> SharedConnection<T>
where
    T: ExceptionTranslator<rusqlite::Error>,
{
    /// Wrap `connection` so that it can be shared between stores.
    pub fn new(connection: Arc<Mutex<Connection>>, translator: T) -> Self {
        Self {
            connection,
            translator,
        }
    }

    /// Run `query` inside a single database transaction.
    ///
    /// The transaction is committed if `query` succeeds and rolled back
    /// otherwise. Errors are translated according to `operation`.
    ///
    /// # Errors
    ///
    /// Returns the translated error from `query` or from committing, or
    /// [StorageError::Unknown] if the connection lock is poisoned.
    pub fn run<R, F>(&self, operation: Operation, query: F) -> Result<R, StorageError>
    where
        F: FnOnce(&Connection) -> Result<R, rusqlite::Error>,
    {
        let mut connection = self.connection.lock().map_err(|error| {
            StorageError::Unknown(format!("could not acquire the database lock: {error}"))
        })?;

        let transaction = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|error| self.translator.translate(operation, error))?;

        let result = query(&transaction).map_err(|error| self.translator.translate(operation, error))?;

        transaction
            .commit()
            .map_err(|error| self.translator.translate(operation, error))?;

        Ok(result)
    }
}

/// Owns the database connection, creates the schema and hands out stores.
///
/// Create one per process (or per test) and call
/// [ensure_schema](RepositoryManager::ensure_schema) before using the stores.
#[derive(Debug)]
pub struct RepositoryManager<T = SQLiteErrorTranslator> {
    connection: SharedConnection<T>,
    schema_ready: AtomicBool,
}

impl RepositoryManager {
    /// Create a manager for `connection` that uses the SQLite error translator.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement cannot be turned on.
    pub fn new(connection: Connection) -> Result<Self, StorageError> {
        Self::with_translator(connection, SQLiteErrorTranslator)
    }
}

impl<T> RepositoryManager<T>
where
    T: ExceptionTranslator<rusqlite::Error> + Clone,
{
    /// Create a manager for `connection` that translates errors with `translator`.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement cannot be turned on.
    pub fn with_translator(connection: Connection, translator: T) -> Result<Self, StorageError> {
        // SQLite only enforces foreign keys when asked to, and the pragma is a
        // no-op inside a transaction.
        connection
            .pragma_update(None, "foreign_keys", true)
            .map_err(|error| translator.translate(Operation::Write, error))?;

        Ok(Self {
            connection: SharedConnection::new(Arc::new(Mutex::new(connection)), translator),
            schema_ready: AtomicBool::new(false),
        })
    }

    /// Create the tables for every resource if they have not been created yet.
    ///
    /// Calling this more than once is harmless. The flag is checked without
    /// the connection lock, so two first calls may both run the `IF NOT EXISTS`
    /// statements.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the tables could not be created.
    pub fn ensure_schema(&self) -> Result<(), StorageError> {
        if self.schema_ready.load(Ordering::Acquire) {
            return Ok(());
        }

        self.connection.run(Operation::Write, |connection| {
            create_account_table(connection)?;
            create_transaction_table(connection)?;
            create_category_tables(connection)?;

            Ok(())
        })?;

        tracing::debug!("database schema is ready");
        self.schema_ready.store(true, Ordering::Release);

        Ok(())
    }

    /// Get a store for accounts.
    pub fn account_store(&self) -> SQLiteAccountStore<T> {
        SQLiteAccountStore::new(self.connection.clone())
    }

    /// Get a store for transactions.
    pub fn transaction_store(&self) -> SQLiteTransactionStore<T> {
        SQLiteTransactionStore::new(self.connection.clone())
    }

    /// Get a store for categories and sub-categories.
    pub fn category_store(&self) -> SQLiteCategoryStore<T> {
        SQLiteCategoryStore::new(self.connection.clone())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::RepositoryManager;

    #[test]
    fn ensure_schema_succeeds() {
        let manager = RepositoryManager::new(Connection::open_in_memory().unwrap()).unwrap();

        assert_eq!(manager.ensure_schema(), Ok(()));
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let manager = RepositoryManager::new(Connection::open_in_memory().unwrap()).unwrap();

        manager.ensure_schema().unwrap();

        assert_eq!(manager.ensure_schema(), Ok(()));
    }

    #[test]
    fn ensure_schema_tolerates_existing_tables() {
        let path = std::env::temp_dir().join(format!("ledger-{}.db", crate::id::generate_id()));

        let first = RepositoryManager::new(Connection::open(&path).unwrap()).unwrap();
        first.ensure_schema().unwrap();
        drop(first);

        let second = RepositoryManager::new(Connection::open(&path).unwrap()).unwrap();
        let result = second.ensure_schema();

        drop(second);
        let _ = std::fs::remove_file(&path);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn concurrent_first_calls_all_succeed() {
        let manager = RepositoryManager::new(Connection::open_in_memory().unwrap()).unwrap();

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| manager.ensure_schema()))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert!(results.iter().all(Result::is_ok), "got {results:?}");
        assert_eq!(manager.ensure_schema(), Ok(()));
    }
}
