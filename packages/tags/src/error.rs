use kb_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Tag '{0}' is not linked to the question")]
    TagNotFound(String),
}

impl From<ValidationError> for TagError {
    fn from(err: ValidationError) -> Self {
        TagError::InvalidTag(err.to_string())
    }
}
