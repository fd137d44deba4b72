//! Generation and validation of resource identifiers.
//!
//! Identifiers are UUID v4 strings in the canonical hyphenated form, e.g.
//! `67e55044-10b1-426f-9247-bb680e5fe0c8`.

use uuid::Uuid;

use crate::validation::ValidationError;

/// The length of an identifier in its canonical hyphenated form.
pub const ID_LENGTH: usize = 36;

/// Create a new, random identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Check that `candidate` is a UUID in the canonical hyphenated form.
///
/// Returns [ValidationError::InvalidId] if it is not.
pub fn validate_id(candidate: &str) -> Option<ValidationError> {
    // `Uuid::try_parse` also accepts the simple, braced and URN forms.
    let is_canonical = candidate.len() == ID_LENGTH && Uuid::try_parse(candidate).is_ok();

    if is_canonical {
        None
    } else {
        Some(ValidationError::InvalidId(candidate.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::ValidationError;

    use super::{ID_LENGTH, generate_id, validate_id};

    #[test]
    fn generated_ids_are_valid() {
        let id = generate_id();

        assert_eq!(id.len(), ID_LENGTH);
        assert_eq!(validate_id(&id), None);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn accepts_canonical_uuid() {
        assert_eq!(validate_id("67e55044-10b1-426f-9247-bb680e5fe0c8"), None);
    }

    #[test]
    fn rejects_empty_string() {
        assert_eq!(
            validate_id(""),
            Some(ValidationError::InvalidId(String::new()))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            validate_id("not-an-id"),
            Some(ValidationError::InvalidId("not-an-id".to_owned()))
        );
    }

    #[test]
    fn rejects_simple_form() {
        let id = "67e5504410b1426f9247bb680e5fe0c8";

        assert_eq!(validate_id(id), Some(ValidationError::InvalidId(id.to_owned())));
    }

    #[test]
    fn rejects_braced_form() {
        let id = "{67e55044-10b1-426f-9247-bb680e5fe0c8}";

        assert_eq!(validate_id(id), Some(ValidationError::InvalidId(id.to_owned())));
    }
}
