use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    id::validate_id,
    resource::Resource,
    validation::{ResourceKind, ValidationError},
};

/// The maximum number of characters in an account name.
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 32;

/// A bank account, credit card or other place where money is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The ID of the account, assigned by the server.
    #[serde(default)]
    pub id: String,
    /// The unique name of the account.
    pub name: String,
    /// The balance of the account when it was opened.
    #[serde(default)]
    pub initial_balance: f64,
    /// When the account was opened.
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub start_timestamp: OffsetDateTime,
}

/// Check the ID and name of `account`.
///
/// Every check is run, so the result contains all of the problems found.
pub fn validate_account(account: &Account) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(error) = validate_id(&account.id) {
        errors.push(error);
    }

    if account.name.chars().count() > MAX_ACCOUNT_NAME_LENGTH {
        errors.push(ValidationError::NameTooLong {
            resource: ResourceKind::Account,
            name: account.name.clone(),
            max: MAX_ACCOUNT_NAME_LENGTH,
        });
    }

    if account.name.trim().is_empty() {
        errors.push(ValidationError::NameBlank {
            resource: ResourceKind::Account,
            name: account.name.clone(),
        });
    }

    errors
}

impl Resource for Account {
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
        validate_account(self)
    }
}
