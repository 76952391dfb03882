// ABOUTME: Input validation for question text and tag names/values
// ABOUTME: Trims, size-checks and rejects null bytes before anything reaches storage

use thiserror::Error;

/// Maximum size of a question text (in characters)
pub const MAX_QUESTION_TEXT_SIZE: usize = 10_000;

/// Maximum size of an answer text (in characters)
pub const MAX_ANSWER_TEXT_SIZE: usize = 50_000;

/// Maximum size of a tag name (in characters)
pub const MAX_TAG_NAME_SIZE: usize = 255;

/// Maximum size of a single tag value (in characters)
pub const MAX_TAG_VALUE_SIZE: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum size of {max} characters (got {actual} characters)")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} contains invalid null bytes")]
    NullByte { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Empty { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NullByte { field } => field,
        }
    }
}

/// Validate and trim question text
pub fn validate_question_text(content: &str) -> Result<String, ValidationError> {
    validate_text_field(content, "Question text", MAX_QUESTION_TEXT_SIZE)
}

/// Validate and trim answer text
pub fn validate_answer_text(content: &str) -> Result<String, ValidationError> {
    validate_text_field(content, "Answer text", MAX_ANSWER_TEXT_SIZE)
}

/// Validate a tag name and return its trimmed form.
///
/// Names are compared case-sensitively, so no case folding happens here.
pub fn normalize_tag_name(name: &str) -> Result<String, ValidationError> {
    validate_text_field(name, "Tag name", MAX_TAG_NAME_SIZE)
}

/// Validate a tag value and return its trimmed form
pub fn normalize_tag_value(value: &str) -> Result<String, ValidationError> {
    validate_text_field(value, "Tag value", MAX_TAG_VALUE_SIZE)
}

fn validate_text_field(
    content: &str,
    field: &'static str,
    max_size: usize,
) -> Result<String, ValidationError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let size = trimmed.chars().count();
    if size > max_size {
        return Err(ValidationError::TooLong {
            field,
            max: max_size,
            actual: size,
        });
    }

    if trimmed.contains('\0') {
        return Err(ValidationError::NullByte { field });
    }

    Ok(trimmed.to_string())
}
