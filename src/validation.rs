//! The user-facing error taxonomy.
//!
//! Every problem that a client can fix by changing its request is reported as
//! a [ValidationError]. Errors have a stable code, namespaced by resource
//! family, and a human-readable message. One or more errors are returned
//! together as a [ValidationFailure].

use std::fmt::Display;

use serde::{Deserialize, Serialize, Serializer};

/// The kinds of resource managed by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A bank account, wallet or similar store of money.
    Account,
    /// A movement of money into or between accounts.
    Transaction,
    /// A named category for transactions.
    Category,
    /// A named subdivision of a category.
    SubCategory,
}

impl ResourceKind {
    /// The prefix used for codes of errors that belong to this resource family.
    pub fn family(self) -> &'static str {
        match self {
            ResourceKind::Account => "ACCOUNT",
            ResourceKind::Transaction => "TRANSACTION",
            ResourceKind::Category => "CATEGORY",
            ResourceKind::SubCategory => "SUBCATEGORY",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Account => "Account",
            ResourceKind::Transaction => "Transaction",
            ResourceKind::Category => "Category",
            ResourceKind::SubCategory => "SubCategory",
        };

        f.write_str(name)
    }
}

/// A single reason why a request was rejected.
///
/// Two errors are equal when both their [code](ValidationError::code) and
/// their message are equal.
#[derive(Debug, Clone, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The string is not a valid resource identifier.
    #[error("'{0}' is not a valid ID.")]
    InvalidId(String),

    /// The request body could not be parsed as the expected resource.
    #[error("The request body is not a valid {0}.")]
    InvalidJson(ResourceKind),

    /// No resource with the given key exists.
    #[error("The {resource} '{id}' could not be found.")]
    NotFound {
        /// The kind of resource that was requested.
        resource: ResourceKind,
        /// The identifier or name used to look up the resource.
        id: String,
    },

    /// A name exceeds the maximum length for the resource.
    #[error("The {resource} name '{name}' is longer than {max} characters.")]
    NameTooLong {
        /// The kind of resource being named.
        resource: ResourceKind,
        /// The offending name.
        name: String,
        /// The maximum number of characters allowed.
        max: usize,
    },

    /// A name is empty or only contains whitespace.
    #[error("The {resource} name '{name}' must not be blank.")]
    NameBlank {
        /// The kind of resource being named.
        resource: ResourceKind,
        /// The offending name.
        name: String,
    },

    /// A name must be unique but is already taken.
    #[error("The {resource} '{name}' already exists.")]
    NameExists {
        /// The kind of resource being named.
        resource: ResourceKind,
        /// The name that is already in use.
        name: String,
    },

    /// The resource cannot be deleted because other resources depend on it.
    #[error("The {resource} '{id}' is still being referenced by other resources.")]
    References {
        /// The kind of resource that could not be deleted.
        resource: ResourceKind,
        /// The identifier or name of the resource.
        id: String,
    },

    /// The resource refers to another resource that does not exist.
    #[error("{}", missing_dependency_message(.resource, .id))]
    MissingDependency {
        /// The kind of the missing resource.
        resource: ResourceKind,
        /// The identifier of the missing resource, if known.
        id: Option<String>,
    },

    /// A transaction uses the same account as both sender and receiver.
    #[error("The account '{0}' cannot be both the sender and the receiver of a transaction.")]
    TransactionCommonAccounts(String),

    /// A category or sub-category name starts with whitespace.
    #[error("The name '{0}' must not start with whitespace.")]
    CategoryLeadingWhitespace(String),

    /// A category or sub-category name ends with whitespace.
    #[error("The name '{0}' must not end with whitespace.")]
    CategoryTrailingWhitespace(String),

    /// A sub-category name was given more than once for the same category.
    #[error("The sub-category '{0}' was given more than once.")]
    CategoryDuplicateSubCategory(String),

    /// A category name is taken by a fixed route under `/categories`.
    #[error("The name '{0}' is reserved and cannot be used for a category.")]
    CategoryReservedName(String),
}

fn missing_dependency_message(resource: &ResourceKind, id: &Option<String>) -> String {
    match id {
        Some(id) => format!("The {resource} '{id}' does not exist."),
        None => format!("The {resource} that this request depends on does not exist."),
    }
}

impl ValidationError {
    /// The stable code for this kind of error, e.g. `COMMON-01` or `ACCOUNT-01`.
    pub fn code(&self) -> String {
        match self {
            ValidationError::InvalidId(_) => "COMMON-01".to_owned(),
            ValidationError::InvalidJson(_) => "COMMON-02".to_owned(),
            ValidationError::NotFound { .. } => "COMMON-03".to_owned(),
            ValidationError::NameTooLong { .. } => "COMMON-04".to_owned(),
            ValidationError::NameBlank { .. } => "COMMON-05".to_owned(),
            ValidationError::NameExists { .. } => "COMMON-06".to_owned(),
            ValidationError::MissingDependency { .. } => "COMMON-07".to_owned(),
            ValidationError::References { resource, .. } => format!("{}-01", resource.family()),
            ValidationError::TransactionCommonAccounts(_) => "TRANSACTION-02".to_owned(),
            ValidationError::CategoryLeadingWhitespace(_) => "CATEGORY-02".to_owned(),
            ValidationError::CategoryTrailingWhitespace(_) => "CATEGORY-03".to_owned(),
            ValidationError::CategoryDuplicateSubCategory(_) => "CATEGORY-04".to_owned(),
            ValidationError::CategoryReservedName(_) => "CATEGORY-05".to_owned(),
        }
    }

    /// The human-readable description of the error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code() && self.message() == other.message()
    }
}

/// The wire format of a [ValidationError].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The stable error code.
    pub code: String,
    /// The human-readable message.
    pub message: String,
}

impl From<&ValidationError> for ErrorBody {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code(),
            message: error.message(),
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorBody::from(self).serialize(serializer)
    }
}

/// A non-empty, ordered list of [ValidationError]s that aborted an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationFailure(Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ValidationFailure {
    /// Wrap `errors` in a failure, or return `None` if there are no errors.
    pub fn new(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Turn the output of a validator into a result.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationFailure] if `errors` is not empty.
    pub fn check(errors: Vec<ValidationError>) -> Result<(), Self> {
        match Self::new(errors) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// The errors in the order they were found.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

impl From<ValidationError> for ValidationFailure {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl Serialize for ValidationFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
