use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    id::validate_id,
    resource::Resource,
    validation::{ResourceKind, ValidationError},
};

/// Money paid into an account, or moved from one account to another.
///
/// A transaction without a sender is a one-way transaction (e.g. a deposit).
/// A transaction with a sender is a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the server.
    #[serde(default)]
    pub id: String,
    /// The amount of money. May be negative.
    pub amount: f64,
    /// The ID of the account that receives the money.
    pub receiver: String,
    /// The ID of the account that sends the money, if any.
    #[serde(default)]
    pub sender: Option<String>,
    /// A free-form description of the transaction.
    #[serde(default)]
    pub description: String,
    /// When the transaction happened.
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Check the IDs in `transaction` and that it does not send money from an
/// account to itself.
///
/// Whether the accounts exist is not checked here, the database enforces it.
pub fn validate_transaction(transaction: &Transaction) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = [
        Some(transaction.id.as_str()),
        Some(transaction.receiver.as_str()),
        transaction.sender.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter_map(validate_id)
    .collect();

    if transaction.sender.as_ref() == Some(&transaction.receiver) {
        errors.push(ValidationError::TransactionCommonAccounts(
            transaction.receiver.clone(),
        ));
    }

    errors
}

impl Resource for Transaction {
    const KIND: ResourceKind = ResourceKind::Transaction;
    const DEPENDENCY: Option<ResourceKind> = Some(ResourceKind::Account);

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(self, id: String) -> Self {
        Self { id, ..self }
    }

    fn unique_key(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Vec<ValidationError> {
        validate_transaction(self)
    }
}
