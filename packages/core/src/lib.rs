// ABOUTME: Core types, validation and constants for the knowledge base
// ABOUTME: Foundational package shared by the engine, storage, use cases and API

pub mod constants;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{Question, QuestionCreateInput, QuestionId, TagSet, TagValues};

// Re-export constants
pub use constants::{database_file, kb_dir, DATABASE_FILE_NAME};

// Re-export validation
pub use validation::{
    normalize_tag_name, normalize_tag_value, validate_answer_text, validate_question_text,
    ValidationError,
};
