//! The controller for categories, which are keyed by name rather than a
//! generated ID.

use crate::{
    Error,
    category::{
        Category, CategoryStore, SQLiteCategoryStore, SubCategory, validate_category,
        validate_category_name, validate_sub_category,
    },
    storage::Translation,
    validation::{ResourceKind, ValidationFailure},
};

/// Creates, reads, renames and deletes categories and their sub-categories.
#[derive(Debug, Clone)]
pub struct CategoryController<S = SQLiteCategoryStore> {
    store: S,
}

impl<S: CategoryStore> CategoryController<S> {
    /// Create a controller backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store `category` along with its sub-categories.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if a name is invalid, a sub-category is
    /// listed twice or the category name is taken.
    pub fn create(&self, category: Category) -> Result<Category, Error> {
        ValidationFailure::check(validate_category(&category))?;

        let name = category.name.clone();

        self.store
            .create(category)
            .map_err(|error| category_translation(&name).apply(error))
    }

    /// Get the category called `name`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `name` is invalid or does not exist.
    pub fn get(&self, name: &str) -> Result<Category, Error> {
        ValidationFailure::check(validate_category_name(name, ResourceKind::Category))?;

        self.store
            .get(name)
            .map_err(|error| category_translation(name).apply(error))
    }

    /// Get every category in the order they were created.
    ///
    /// # Errors
    ///
    /// Returns [Error::Storage] if the categories could not be read.
    pub fn list(&self) -> Result<Vec<Category>, Error> {
        self.store.get_all().map_err(|error| {
            tracing::debug!("could not list categories: {error}");
            Error::Storage(error.to_string())
        })
    }

    /// Rename the category `old_name` to `new_name`.
    ///
    /// Only the new name is validated. Renaming a category to its current name
    /// does nothing.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `new_name` is invalid or taken, or there
    /// is no category `old_name`.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<(), Error> {
        ValidationFailure::check(validate_category_name(new_name, ResourceKind::Category))?;

        if old_name == new_name {
            return Ok(());
        }

        self.store
            .rename(old_name, new_name)
            .map_err(|error| {
                Translation {
                    resource: ResourceKind::Category,
                    id: old_name,
                    unique_key: new_name,
                    dependency: ResourceKind::Category,
                    dependency_id: None,
                }
                .apply(error)
            })
    }

    /// Delete the category called `name` and all of its sub-categories.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `name` is invalid or does not exist.
    pub fn delete(&self, name: &str) -> Result<(), Error> {
        ValidationFailure::check(validate_category_name(name, ResourceKind::Category))?;

        self.store
            .delete(name)
            .map_err(|error| category_translation(name).apply(error))
    }

    /// Add `sub_category` to an existing category.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if a name is invalid, the category does not
    /// exist or already has a sub-category with the same name.
    pub fn create_sub_category(&self, sub_category: SubCategory) -> Result<SubCategory, Error> {
        ValidationFailure::check(validate_sub_category(&sub_category))?;

        let SubCategory { category, name } = sub_category.clone();

        self.store
            .create_sub_category(sub_category)
            .map_err(|error| {
                Translation {
                    resource: ResourceKind::SubCategory,
                    id: &name,
                    unique_key: &name,
                    dependency: ResourceKind::Category,
                    dependency_id: Some(&category),
                }
                .apply(error)
            })
    }

    /// Delete the sub-category `name` from `category`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if a name is invalid or there is no such
    /// sub-category.
    pub fn delete_sub_category(&self, category: &str, name: &str) -> Result<(), Error> {
        let sub_category = SubCategory {
            category: category.to_owned(),
            name: name.to_owned(),
        };
        ValidationFailure::check(validate_sub_category(&sub_category))?;

        let path = format!("{category}/{name}");

        self.store
            .delete_sub_category(category, name)
            .map_err(|error| {
                Translation {
                    resource: ResourceKind::SubCategory,
                    id: &path,
                    unique_key: name,
                    dependency: ResourceKind::Category,
                    dependency_id: Some(category),
                }
                .apply(error)
            })
    }
}

fn category_translation(name: &str) -> Translation<'_> {
    Translation {
        resource: ResourceKind::Category,
        id: name,
        unique_key: name,
        dependency: ResourceKind::Category,
        dependency_id: None,
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{Category, SubCategory},
        db::RepositoryManager,
        validation::{ResourceKind, ValidationError, ValidationFailure},
    };

    use super::CategoryController;

    fn get_test_controller() -> CategoryController {
        let manager = RepositoryManager::new(Connection::open_in_memory().unwrap()).unwrap();
        manager.ensure_schema().unwrap();
        CategoryController::new(manager.category_store())
    }

    fn category(name: &str, sub_categories: &[&str]) -> Category {
        Category {
            name: name.to_owned(),
            sub_categories: sub_categories.iter().map(|&name| name.to_owned()).collect(),
        }
    }

    fn sub_category(category: &str, name: &str) -> SubCategory {
        SubCategory {
            category: category.to_owned(),
            name: name.to_owned(),
        }
    }

    #[track_caller]
    fn assert_validation_errors<T: std::fmt::Debug>(
        result: Result<T, Error>,
        want: Vec<ValidationError>,
    ) {
        let want = ValidationFailure::new(want).expect("want must not be empty");
        assert_eq!(result.unwrap_err(), Error::Validation(want));
    }

    #[test]
    fn create_then_get_round_trips() {
        let controller = get_test_controller();
        let want = category("bills", &["power"]);

        let created = controller.create(want.clone()).unwrap();

        assert_eq!(created, want);
        assert_eq!(controller.get("bills").unwrap(), want);
    }

    #[test]
    fn create_duplicate_is_name_exists() {
        let controller = get_test_controller();
        controller.create(category("bills", &[])).unwrap();

        let result = controller.create(category("bills", &[]));

        assert_validation_errors(
            result,
            vec![ValidationError::NameExists {
                resource: ResourceKind::Category,
                name: "bills".to_owned(),
            }],
        );
    }

    #[test]
    fn create_invalid_category_does_not_store_it() {
        let controller = get_test_controller();

        let result = controller.create(category(" bills", &["power", "power"]));

        assert_validation_errors(
            result,
            vec![
                ValidationError::CategoryLeadingWhitespace(" bills".to_owned()),
                ValidationError::CategoryDuplicateSubCategory("power".to_owned()),
            ],
        );
        assert_eq!(controller.list().unwrap(), vec![]);
    }

    #[test]
    fn get_missing_is_not_found() {
        let controller = get_test_controller();

        assert_validation_errors(
            controller.get("bills"),
            vec![ValidationError::NotFound {
                resource: ResourceKind::Category,
                id: "bills".to_owned(),
            }],
        );
    }

    #[test]
    fn rename_validates_only_the_new_name() {
        let controller = get_test_controller();

        let result = controller.rename(" old name ", "");

        assert_validation_errors(
            result,
            vec![ValidationError::NameBlank {
                resource: ResourceKind::Category,
                name: String::new(),
            }],
        );
    }

    #[test]
    fn rename_to_same_name_is_a_no_op() {
        let controller = get_test_controller();

        assert_eq!(controller.rename("bills", "bills"), Ok(()));
    }

    #[test]
    fn rename_keeps_sub_categories() {
        let controller = get_test_controller();
        controller.create(category("bills", &["power"])).unwrap();

        controller.rename("bills", "utilities").unwrap();

        assert_eq!(
            controller.list().unwrap(),
            vec![category("utilities", &["power"])]
        );
    }

    #[test]
    fn rename_missing_is_not_found() {
        let controller = get_test_controller();

        assert_validation_errors(
            controller.rename("bills", "utilities"),
            vec![ValidationError::NotFound {
                resource: ResourceKind::Category,
                id: "bills".to_owned(),
            }],
        );
    }

    #[test]
    fn rename_to_taken_name_is_name_exists() {
        let controller = get_test_controller();
        controller.create(category("bills", &[])).unwrap();
        controller.create(category("wages", &[])).unwrap();

        assert_validation_errors(
            controller.rename("bills", "wages"),
            vec![ValidationError::NameExists {
                resource: ResourceKind::Category,
                name: "wages".to_owned(),
            }],
        );
    }

    #[test]
    fn delete_twice_is_not_found() {
        let controller = get_test_controller();
        controller.create(category("bills", &["power"])).unwrap();

        controller.delete("bills").unwrap();

        assert_validation_errors(
            controller.delete("bills"),
            vec![ValidationError::NotFound {
                resource: ResourceKind::Category,
                id: "bills".to_owned(),
            }],
        );
    }

    #[test]
    fn create_sub_category_of_missing_category_is_missing_dependency() {
        let controller = get_test_controller();

        assert_validation_errors(
            controller.create_sub_category(sub_category("bills", "power")),
            vec![ValidationError::MissingDependency {
                resource: ResourceKind::Category,
                id: Some("bills".to_owned()),
            }],
        );
    }

    #[test]
    fn create_duplicate_sub_category_is_name_exists() {
        let controller = get_test_controller();
        controller.create(category("bills", &["power"])).unwrap();

        assert_validation_errors(
            controller.create_sub_category(sub_category("bills", "power")),
            vec![ValidationError::NameExists {
                resource: ResourceKind::SubCategory,
                name: "power".to_owned(),
            }],
        );
    }

    #[test]
    fn create_sub_category_appends_to_category() {
        let controller = get_test_controller();
        controller.create(category("bills", &["power"])).unwrap();

        controller
            .create_sub_category(sub_category("bills", "water"))
            .unwrap();

        assert_eq!(
            controller.get("bills").unwrap(),
            category("bills", &["power", "water"])
        );
    }

    #[test]
    fn delete_missing_sub_category_is_not_found() {
        let controller = get_test_controller();
        controller.create(category("bills", &[])).unwrap();

        assert_validation_errors(
            controller.delete_sub_category("bills", "power"),
            vec![ValidationError::NotFound {
                resource: ResourceKind::SubCategory,
                id: "bills/power".to_owned(),
            }],
        );
    }

    #[test]
    fn delete_sub_category_keeps_the_rest() {
        let controller = get_test_controller();
        controller
            .create(category("bills", &["power", "water"]))
            .unwrap();

        controller.delete_sub_category("bills", "power").unwrap();

        assert_eq!(
            controller.get("bills").unwrap(),
            category("bills", &["water"])
        );
    }
}
