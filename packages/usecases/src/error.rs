use kb_core::QuestionId;
use kb_storage::StorageError;
use kb_tags::TagError;
use thiserror::Error;

/// Errors surfaced by the use-case handlers
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Question {0} not found")]
    QuestionNotFound(QuestionId),

    #[error("Tag '{0}' is not linked to the question")]
    TagNotFound(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Question {id} kept changing concurrently, gave up after {attempts} attempts")]
    ConcurrentModification { id: QuestionId, attempts: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<TagError> for UseCaseError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::InvalidTag(message) => UseCaseError::InvalidTag(message),
            TagError::TagNotFound(name) => UseCaseError::TagNotFound(name),
        }
    }
}

pub type UseCaseResult<T> = Result<T, UseCaseError>;
