// src/domain/text.rs
use crate::domain::errors::{DomainError, DomainResult};

/// Checks a user supplied string against the column limits shared by most
/// value objects. Length is counted in characters, not bytes.
pub fn validate_text(
    field: &str,
    value: &str,
    allow_blank: bool,
    max_chars: usize,
) -> DomainResult<()> {
    if !allow_blank && value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max_chars {
        return Err(DomainError::validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

/// Declares a string newtype validated with [`validate_text`].
macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, max = $max:expr) => {
        bounded_text!($(#[$meta])* $name, $field, max = $max, allow_blank = false);
    };
    ($(#[$meta:meta])* $name:ident, $field:literal, max = $max:expr, allow_blank = $blank:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub const MAX_CHARS: usize = $max;

            pub fn new(value: impl Into<String>) -> $crate::domain::errors::DomainResult<Self> {
                let value = value.into();
                $crate::domain::text::validate_text($field, &value, $blank, $max)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use bounded_text;

#[cfg(test)]
mod tests {
    use super::*;

    bounded_text!(ShortText, "short text", max = 5);
    bounded_text!(OptionalText, "optional text", max = 3, allow_blank = true);

    #[test]
    fn rejects_blank_unless_allowed() {
        assert!(ShortText::new("   ").is_err());
        assert!(OptionalText::new("").is_ok());
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(ShortText::new("ações").is_ok());
        assert!(ShortText::new("ações!").is_err());
    }

    #[test]
    fn error_names_the_field() {
        let err = validate_text("title", "", false, 10).unwrap_err();
        assert_eq!(err.to_string(), "validation error: title cannot be empty");
    }
}
