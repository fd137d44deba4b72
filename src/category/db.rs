//! SQLite storage for categories and sub-categories.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};

use crate::{
    category::{Category, SubCategory},
    db::SharedConnection,
    storage::{ExceptionTranslator, Operation, SQLiteErrorTranslator, StorageError},
};

/// Creates, retrieves, renames and deletes categories and their sub-categories.
pub trait CategoryStore {
    /// Add `category` and its sub-categories to the store.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::DuplicateKey] if the name is already taken.
    fn create(&self, category: Category) -> Result<Category, StorageError>;

    /// Get the category called `name`, along with its sub-categories.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::NotFound] if there is no such category.
    fn get(&self, name: &str) -> Result<Category, StorageError>;

    /// Get every category in the order they were created.
    fn get_all(&self) -> Result<Vec<Category>, StorageError>;

    /// Rename the category `old_name` to `new_name`, keeping its sub-categories.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::NotFound] if there is no category `old_name`, or
    /// [StorageError::DuplicateKey] if `new_name` is taken.
    fn rename(&self, old_name: &str, new_name: &str) -> Result<(), StorageError>;

    /// Delete the category called `name` and all of its sub-categories.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::NotFound] if there is no such category.
    fn delete(&self, name: &str) -> Result<(), StorageError>;

    /// Whether a category called `name` exists.
    fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Add `sub_category` to its category.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::ParentMissing] if the category does not exist, or
    /// [StorageError::DuplicateKey] if the category already has a
    /// sub-category with the same name.
    fn create_sub_category(&self, sub_category: SubCategory) -> Result<SubCategory, StorageError>;

    /// Delete the sub-category `name` from `category`.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::NotFound] if there is no such sub-category.
    fn delete_sub_category(&self, category: &str, name: &str) -> Result<(), StorageError>;
}

/// Create the category and sub-category tables.
///
/// Sub-categories follow their category when it is renamed and are deleted
/// along with it.
pub fn create_category_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            name TEXT PRIMARY KEY NOT NULL
        );

        CREATE TABLE IF NOT EXISTS subcategory (
            category TEXT NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY(category, name),
            FOREIGN KEY(category) REFERENCES category(name) ON UPDATE CASCADE ON DELETE CASCADE
        );",
    )?;

    Ok(())
}

/// Stores categories and sub-categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore<T = SQLiteErrorTranslator> {
    connection: SharedConnection<T>,
}

impl<T> SQLiteCategoryStore<T> {
    /// Create a category store that uses `connection`.
    pub fn new(connection: SharedConnection<T>) -> Self {
        Self { connection }
    }
}

fn get_sub_categories(connection: &Connection, category: &str) -> Result<Vec<String>, rusqlite::Error> {
    connection
        .prepare("SELECT name FROM subcategory WHERE category = ?1 ORDER BY rowid")?
        .query_map([category], |row| row.get(0))?
        .collect()
}

impl<T> CategoryStore for SQLiteCategoryStore<T>
where
    T: ExceptionTranslator<rusqlite::Error>,
{
    fn create(&self, category: Category) -> Result<Category, StorageError> {
        self.connection.run(Operation::Write, |connection| {
            connection.execute("INSERT INTO category (name) VALUES (?1)", [&category.name])?;

            let mut statement =
                connection.prepare("INSERT INTO subcategory (category, name) VALUES (?1, ?2)")?;

            for name in &category.sub_categories {
                statement.execute([&category.name, name])?;
            }

            Ok(category)
        })
    }

    fn get(&self, name: &str) -> Result<Category, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            let name: String =
                connection.query_row("SELECT name FROM category WHERE name = ?1", [name], |row| {
                    row.get(0)
                })?;
            let sub_categories = get_sub_categories(connection, &name)?;

            Ok(Category {
                name,
                sub_categories,
            })
        })
    }

    fn get_all(&self) -> Result<Vec<Category>, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            let mut categories: Vec<Category> = connection
                .prepare("SELECT name FROM category ORDER BY rowid")?
                .query_map([], |row| {
                    Ok(Category {
                        name: row.get(0)?,
                        sub_categories: Vec::new(),
                    })
                })?
                .collect::<Result<_, _>>()?;

            let positions: HashMap<String, usize> = categories
                .iter()
                .enumerate()
                .map(|(position, category)| (category.name.clone(), position))
                .collect();

            let mut statement =
                connection.prepare("SELECT category, name FROM subcategory ORDER BY rowid")?;
            let rows = statement.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            for row in rows {
                let (category, name) = row?;

                if let Some(&position) = positions.get(&category) {
                    categories[position].sub_categories.push(name);
                }
            }

            Ok(categories)
        })
    }

    fn rename(&self, old_name: &str, new_name: &str) -> Result<(), StorageError> {
        self.connection.run(Operation::Write, |connection| {
            let rows_affected = connection.execute(
                "UPDATE category SET name = ?1 WHERE name = ?2",
                [new_name, old_name],
            )?;

            if rows_affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }

            Ok(())
        })
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.connection.run(Operation::Delete, |connection| {
            let rows_affected = connection.execute("DELETE FROM category WHERE name = ?1", [name])?;

            if rows_affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }

            Ok(())
        })
    }

    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        self.connection.run(Operation::Read, |connection| {
            connection
                .query_row("SELECT 1 FROM category WHERE name = ?1", [name], |_| Ok(()))
                .optional()
                .map(|row| row.is_some())
        })
    }

    fn create_sub_category(&self, sub_category: SubCategory) -> Result<SubCategory, StorageError> {
        self.connection.run(Operation::Write, |connection| {
            connection.execute(
                "INSERT INTO subcategory (category, name) VALUES (?1, ?2)",
                [&sub_category.category, &sub_category.name],
            )?;

            Ok(sub_category)
        })
    }

    fn delete_sub_category(&self, category: &str, name: &str) -> Result<(), StorageError> {
        self.connection.run(Operation::Delete, |connection| {
            let rows_affected = connection.execute(
                "DELETE FROM subcategory WHERE category = ?1 AND name = ?2",
                [category, name],
            )?;

            if rows_affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }

            Ok(())
        })
    }
}
