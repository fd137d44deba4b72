use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::validation::{ResourceKind, ValidationError};

/// The maximum number of characters in a category or sub-category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 32;

/// Names that would be shadowed by fixed routes under `/categories`.
pub const RESERVED_CATEGORY_NAMES: [&str; 1] = ["sub"];

/// A category for expenses and income, e.g. 'Bills', 'Groceries', 'Wages'.
///
/// Categories are identified by their unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The unique name of the category.
    pub name: String,
    /// The names of the category's sub-categories, in the order they were created.
    #[serde(default)]
    pub sub_categories: Vec<String>,
}

/// A subdivision of a category, e.g. 'Power' under 'Bills'.
///
/// The name is unique within its category but may be reused in other categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    /// The name of the parent category.
    pub category: String,
    /// The name of the sub-category.
    pub name: String,
}

/// Check a category or sub-category name.
///
/// A blank name is reported on its own. Otherwise the length and surrounding
/// whitespace are checked and every problem is reported. Category names (but
/// not sub-category names) must also not be one of [RESERVED_CATEGORY_NAMES].
pub fn validate_category_name(name: &str, resource: ResourceKind) -> Vec<ValidationError> {
    if name.trim().is_empty() {
        return vec![ValidationError::NameBlank {
            resource,
            name: name.to_owned(),
        }];
    }

    let mut errors = Vec::new();

    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        errors.push(ValidationError::NameTooLong {
            resource,
            name: name.to_owned(),
            max: MAX_CATEGORY_NAME_LENGTH,
        });
    }

    if name.starts_with(char::is_whitespace) {
        errors.push(ValidationError::CategoryLeadingWhitespace(name.to_owned()));
    }

    if name.ends_with(char::is_whitespace) {
        errors.push(ValidationError::CategoryTrailingWhitespace(
            name.to_owned(),
        ));
    }

    if resource == ResourceKind::Category && RESERVED_CATEGORY_NAMES.contains(&name) {
        errors.push(ValidationError::CategoryReservedName(name.to_owned()));
    }

    errors
}

/// Check the name of `category` and the names of its sub-categories.
///
/// Each sub-category name may only be given once.
pub fn validate_category(category: &Category) -> Vec<ValidationError> {
    let mut errors = validate_category_name(&category.name, ResourceKind::Category);
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for name in &category.sub_categories {
        errors.extend(validate_category_name(name, ResourceKind::SubCategory));

        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            errors.push(ValidationError::CategoryDuplicateSubCategory(name.clone()));
        }
    }

    errors
}

/// Check the names in `sub_category`.
pub fn validate_sub_category(sub_category: &SubCategory) -> Vec<ValidationError> {
    let mut errors = validate_category_name(&sub_category.category, ResourceKind::Category);
    errors.extend(validate_category_name(
        &sub_category.name,
        ResourceKind::SubCategory,
    ));

    errors
}
