//! Input validation failures. Display strings are shown to the user as-is.

use thiserror::Error;

/// Validation error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("Please fill in the email")]
    MissingEmail,

    #[error("Please fill in the password")]
    MissingPassword,

    #[error("10 digits are required to get search results")]
    PhoneDigits,

    #[error("At least 3 entered symbols are required to get search results")]
    SearchTooShort,

    /// Labels of the empty or malformed form fields, comma separated.
    #[error("Please fill in {0}")]
    RequiredFields(String),

    #[error("{field} must be shorter than {max} characters")]
    TooLong { field: &'static str, max: usize },
}
