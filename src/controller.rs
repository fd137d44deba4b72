//! The controller for resources identified by a generated ID.
//!
//! Every operation follows the same steps: validate the input, call the store
//! and translate any storage error into a [ValidationError]. Validation
//! always happens before the store is touched, so a rejected request never
//! changes the database.

use std::marker::PhantomData;

use crate::{
    Error,
    id::{generate_id, validate_id},
    resource::Resource,
    storage::{Store, StorageError, Translation},
    validation::ValidationFailure,
};

/// Creates, reads, updates and deletes resources of type `R` held in `S`.
#[derive(Debug)]
pub struct Controller<R, S> {
    store: S,
    resource: PhantomData<fn() -> R>,
}

impl<R, S: Clone> Clone for Controller<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            resource: PhantomData,
        }
    }
}

impl<R, S> Controller<R, S>
where
    R: Resource,
    S: Store<R>,
{
    /// Create a controller backed by `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            resource: PhantomData,
        }
    }

    /// Store `resource` under a newly generated ID and return it.
    ///
    /// Any ID given by the caller is replaced.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the resource is invalid, uses a taken
    /// name or refers to a missing resource.
    pub fn create(&self, resource: R) -> Result<R, Error> {
        let candidate = resource.with_id(generate_id());
        ValidationFailure::check(candidate.validate())?;

        let id = candidate.id().to_owned();
        let unique_key = candidate.unique_key().to_owned();

        self.store
            .create(candidate)
            .map_err(|error| translation::<R>(&id, &unique_key).apply(error))
    }

    /// Get the resource with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `id` is malformed or does not exist.
    pub fn get(&self, id: &str) -> Result<R, Error> {
        check_id(id)?;

        self.store
            .get(id)
            .map_err(|error| translation::<R>(id, id).apply(error))
    }

    /// Get every resource in the order they were created.
    ///
    /// # Errors
    ///
    /// Returns [Error::Storage] if the resources could not be read.
    pub fn list(&self) -> Result<Vec<R>, Error> {
        self.store.get_all().map_err(unexpected::<R>)
    }

    /// Replace the stored resource with the same ID as `resource`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the resource is invalid, does not exist,
    /// uses a taken name or refers to a missing resource.
    pub fn update(&self, resource: R) -> Result<R, Error> {
        ValidationFailure::check(resource.validate())?;

        let id = resource.id().to_owned();
        let unique_key = resource.unique_key().to_owned();

        self.store
            .update(resource)
            .map_err(|error| translation::<R>(&id, &unique_key).apply(error))
    }

    /// Delete the resource with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `id` is malformed, does not exist or is
    /// still referenced by other resources.
    pub fn delete(&self, id: &str) -> Result<(), Error> {
        check_id(id)?;

        self.store
            .delete(id)
            .map_err(|error| translation::<R>(id, id).apply(error))
    }
}

fn check_id(id: &str) -> Result<(), ValidationFailure> {
    match validate_id(id) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn translation<'a, R: Resource>(id: &'a str, unique_key: &'a str) -> Translation<'a> {
    Translation {
        resource: R::KIND,
        id,
        unique_key,
        dependency: R::DEPENDENCY.unwrap_or(R::KIND),
        dependency_id: None,
    }
}

fn unexpected<R: Resource>(error: StorageError) -> Error {
    tracing::debug!("could not list {} resources: {error}", R::KIND);
    Error::Storage(error.to_string())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use crate::{
        Error,
        id::generate_id,
        resource::Resource,
        storage::{StorageError, Store},
        validation::{ResourceKind, ValidationError, ValidationFailure},
    };

    use super::Controller;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        id: String,
        name: String,
    }

    impl Resource for Widget {
        const KIND: ResourceKind = ResourceKind::Account;
        const DEPENDENCY: Option<ResourceKind> = None;

        fn id(&self) -> &str {
            &self.id
        }

        fn with_id(self, id: String) -> Self {
            Self { id, ..self }
        }

        fn unique_key(&self) -> &str {
            &self.name
        }

        fn validate(&self) -> Vec<ValidationError> {
            let mut errors: Vec<_> = crate::id::validate_id(&self.id).into_iter().collect();

            if self.name.is_empty() {
                errors.push(ValidationError::NameBlank {
                    resource: Self::KIND,
                    name: self.name.clone(),
                });
            }

            errors
        }
    }

    /// A store that fails every write with a fixed error and counts calls.
    #[derive(Debug, Default)]
    struct StubStore {
        error: Option<StorageError>,
        calls: RefCell<usize>,
        widgets: RefCell<HashMap<String, Widget>>,
    }

    impl StubStore {
        fn failing(error: StorageError) -> Self {
            Self {
                error: Some(error),
                ..Default::default()
            }
        }

        fn result<T>(&self, value: T) -> Result<T, StorageError> {
            *self.calls.borrow_mut() += 1;

            match &self.error {
                Some(error) => Err(error.clone()),
                None => Ok(value),
            }
        }
    }

    impl Store<Widget> for &StubStore {
        fn create(&self, resource: Widget) -> Result<Widget, StorageError> {
            let widget = self.result(resource)?;
            self.widgets
                .borrow_mut()
                .insert(widget.id.clone(), widget.clone());
            Ok(widget)
        }

        fn get(&self, id: &str) -> Result<Widget, StorageError> {
            self.result(())?;
            self.widgets
                .borrow()
                .get(id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        fn get_all(&self) -> Result<Vec<Widget>, StorageError> {
            self.result(self.widgets.borrow().values().cloned().collect())
        }

        fn update(&self, resource: Widget) -> Result<Widget, StorageError> {
            self.result(resource)
        }

        fn delete(&self, id: &str) -> Result<(), StorageError> {
            self.result(())?;
            self.widgets
                .borrow_mut()
                .remove(id)
                .map(|_| ())
                .ok_or(StorageError::NotFound)
        }

        fn exists(&self, id: &str) -> Result<bool, StorageError> {
            self.result(self.widgets.borrow().contains_key(id))
        }
    }

    fn widget(name: &str) -> Widget {
        Widget {
            id: "client supplied".to_owned(),
            name: name.to_owned(),
        }
    }

    #[track_caller]
    fn assert_validation_error(result: Result<impl std::fmt::Debug, Error>, want: ValidationError) {
        assert_eq!(
            result.unwrap_err(),
            Error::Validation(ValidationFailure::from(want))
        );
    }

    #[test]
    fn create_replaces_client_id() {
        let store = StubStore::default();
        let controller = Controller::new(&store);

        let created = controller.create(widget("foo")).unwrap();

        assert_ne!(created.id, "client supplied");
        assert_eq!(crate::id::validate_id(&created.id), None);
    }

    #[test]
    fn create_does_not_touch_store_when_invalid() {
        let store = StubStore::default();
        let controller = Controller::new(&store);

        let result = controller.create(widget(""));

        assert_validation_error(
            result,
            ValidationError::NameBlank {
                resource: ResourceKind::Account,
                name: String::new(),
            },
        );
        assert_eq!(*store.calls.borrow(), 0);
    }

    #[test]
    fn create_translates_duplicate_key_to_name_exists() {
        let store = StubStore::failing(StorageError::DuplicateKey("widget.name".to_owned()));
        let controller = Controller::new(&store);

        let result = controller.create(widget("foo"));

        assert_validation_error(
            result,
            ValidationError::NameExists {
                resource: ResourceKind::Account,
                name: "foo".to_owned(),
            },
        );
    }

    #[test]
    fn create_translates_parent_missing_to_missing_dependency() {
        let store = StubStore::failing(StorageError::ParentMissing);
        let controller = Controller::new(&store);

        let result = controller.create(widget("foo"));

        assert_validation_error(
            result,
            ValidationError::MissingDependency {
                resource: ResourceKind::Account,
                id: None,
            },
        );
    }

    #[test]
    fn unknown_storage_error_is_not_a_validation_error() {
        let store = StubStore::failing(StorageError::Unknown("disk on fire".to_owned()));
        let controller = Controller::new(&store);

        let result = controller.create(widget("foo"));

        assert_eq!(result, Err(Error::Storage("disk on fire".to_owned())));
    }

    #[test]
    fn get_rejects_malformed_id_without_touching_store() {
        let store = StubStore::default();
        let controller = Controller::new(&store);

        let result = controller.get("nope");

        assert_validation_error(result, ValidationError::InvalidId("nope".to_owned()));
        assert_eq!(*store.calls.borrow(), 0);
    }

    #[test]
    fn get_translates_not_found() {
        let store = StubStore::default();
        let controller = Controller::new(&store);
        let id = generate_id();

        let result = controller.get(&id);

        assert_validation_error(
            result,
            ValidationError::NotFound {
                resource: ResourceKind::Account,
                id,
            },
        );
    }

    #[test]
    fn update_validates_id() {
        let store = StubStore::default();
        let controller = Controller::new(&store);

        let result = controller.update(widget("foo"));

        assert_validation_error(
            result,
            ValidationError::InvalidId("client supplied".to_owned()),
        );
        assert_eq!(*store.calls.borrow(), 0);
    }

    #[test]
    fn update_translates_not_found() {
        let store = StubStore::failing(StorageError::NotFound);
        let controller = Controller::new(&store);
        let id = generate_id();

        let result = controller.update(widget("foo").with_id(id.clone()));

        assert_validation_error(
            result,
            ValidationError::NotFound {
                resource: ResourceKind::Account,
                id,
            },
        );
    }

    #[test]
    fn delete_translates_child_exists_to_references() {
        let store = StubStore::failing(StorageError::ChildExists);
        let controller = Controller::new(&store);
        let id = generate_id();

        let result = controller.delete(&id);

        assert_validation_error(
            result,
            ValidationError::References {
                resource: ResourceKind::Account,
                id,
            },
        );
    }

    #[test]
    fn delete_twice_is_not_found() {
        let store = StubStore::default();
        let controller = Controller::new(&store);
        let created = controller.create(widget("foo")).unwrap();

        controller.delete(&created.id).unwrap();
        let result = controller.delete(&created.id);

        assert_validation_error(
            result,
            ValidationError::NotFound {
                resource: ResourceKind::Account,
                id: created.id,
            },
        );
    }
}
