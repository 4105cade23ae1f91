//! Name validation for lists and todos
//!
//! All user input is validated before it reaches storage. The validated
//! newtypes in [`crate::model`] can only be built through these functions.

use std::fmt;

use crate::model::{ListName, TodoName};

/// Minimum length (in characters) for list and todo names
pub const MIN_NAME_LEN: usize = 1;

/// Maximum length (in characters) for list and todo names
pub const MAX_NAME_LEN: usize = 100;

/// Which kind of name failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    List,
    Todo,
}

/// Validation error for list and todo names.
///
/// `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or longer than [`MAX_NAME_LEN`] characters
    InvalidLength { field: NameField },

    /// Another list already uses this name
    DuplicateName { name: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength {
                field: NameField::List,
            } => write!(
                f,
                "The list name must be between {} and {} characters.",
                MIN_NAME_LEN, MAX_NAME_LEN
            ),
            Self::InvalidLength {
                field: NameField::Todo,
            } => write!(
                f,
                "The todo must be between {} and {} characters.",
                MIN_NAME_LEN, MAX_NAME_LEN
            ),
            Self::DuplicateName { .. } => write!(f, "The list name must be unique."),
        }
    }
}

impl std::error::Error for ValidationError {}

fn has_valid_length(name: &str) -> bool {
    (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.chars().count())
}

/// Validate a name for a new list.
///
/// Length is checked before uniqueness. Uniqueness is an exact,
/// case-sensitive comparison against `existing_names`.
///
/// # Example
/// ```
/// use todolists_core::validation::{validate_list_name, ValidationError};
///
/// assert!(validate_list_name("Groceries", ["Chores"]).is_ok());
/// assert!(matches!(
///     validate_list_name("Chores", ["Chores"]),
///     Err(ValidationError::DuplicateName { .. })
/// ));
/// ```
pub fn validate_list_name<I, S>(name: &str, existing_names: I) -> Result<ListName, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !has_valid_length(name) {
        return Err(ValidationError::InvalidLength {
            field: NameField::List,
        });
    }

    if existing_names.into_iter().any(|existing| existing.as_ref() == name) {
        return Err(ValidationError::DuplicateName {
            name: name.to_owned(),
        });
    }

    Ok(ListName::from_validated(name.to_owned()))
}

/// Validate a new name for an existing list.
///
/// Same rules as [`validate_list_name`], except that keeping the list's
/// current name is accepted rather than reported as a duplicate.
pub fn validate_list_rename<I, S>(
    name: &str,
    current_name: &str,
    existing_names: I,
) -> Result<ListName, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if name == current_name {
        // Still subject to the length rule in case the stored name predates it
        return validate_list_name(name, std::iter::empty::<&str>());
    }
    validate_list_name(name, existing_names)
}

/// Validate a todo name. Todos have no uniqueness constraint.
pub fn validate_todo_name(name: &str) -> Result<TodoName, ValidationError> {
    if !has_valid_length(name) {
        return Err(ValidationError::InvalidLength {
            field: NameField::Todo,
        });
    }
    Ok(TodoName::from_validated(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn accepts_boundary_lengths() {
        assert!(validate_list_name("a", NONE).is_ok());
        assert!(validate_list_name(&"a".repeat(100), NONE).is_ok());
        assert!(validate_todo_name("a").is_ok());
        assert!(validate_todo_name(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn rejects_empty_and_too_long() {
        let err = validate_list_name("", NONE).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidLength {
                field: NameField::List
            }
        );

        let err = validate_list_name(&"a".repeat(101), NONE).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLength { .. }));

        let err = validate_todo_name(&"a".repeat(101)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidLength {
                field: NameField::Todo
            }
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 100 two-byte characters
        let name = "é".repeat(100);
        assert_eq!(name.len(), 200);
        assert!(validate_todo_name(&name).is_ok());
    }

    #[test]
    fn rejects_exact_duplicate() {
        let existing = vec!["Groceries".to_string(), "Chores".to_string()];
        let err = validate_list_name("Chores", &existing).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateName {
                name: "Chores".into()
            }
        );
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        assert!(validate_list_name("chores", ["Chores"]).is_ok());
    }

    #[test]
    fn length_is_checked_before_uniqueness() {
        let err = validate_list_name("", [""]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLength { .. }));
    }

    #[test]
    fn rename_to_current_name_is_accepted() {
        let existing = ["Groceries", "Chores"];
        let name = validate_list_rename("Chores", "Chores", existing).unwrap();
        assert_eq!(name.as_str(), "Chores");
    }

    #[test]
    fn rename_to_other_existing_name_is_rejected() {
        let existing = ["Groceries", "Chores"];
        let err = validate_list_rename("Groceries", "Chores", existing).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateName { .. }));
    }

    #[test]
    fn user_facing_messages() {
        assert_eq!(
            ValidationError::InvalidLength {
                field: NameField::List
            }
            .to_string(),
            "The list name must be between 1 and 100 characters."
        );
        assert_eq!(
            ValidationError::InvalidLength {
                field: NameField::Todo
            }
            .to_string(),
            "The todo must be between 1 and 100 characters."
        );
        assert_eq!(
            ValidationError::DuplicateName { name: "x".into() }.to_string(),
            "The list name must be unique."
        );
    }
}
