// ABOUTME: Data layer and persistence for the knowledge base
// ABOUTME: QuestionStore trait, storage errors and the SQLite implementation

use async_trait::async_trait;
use kb_core::{Question, QuestionCreateInput, QuestionId, TagSet};
use std::path::PathBuf;
use thiserror::Error;

pub mod sqlite;

pub use sqlite::SqliteQuestionStore;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Question not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub enable_wal: bool,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: kb_core::database_file(),
            enable_wal: true,
            max_connections: 10,
            busy_timeout_seconds: 30,
        }
    }
}

/// Persistence for questions and their tags.
///
/// Tag mutations are optimistic: `replace_tags` only writes when the stored
/// version still equals `expected_version`, so callers re-read and retry on
/// `Ok(false)` instead of overwriting a concurrent change.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn create_question(&self, input: QuestionCreateInput) -> StorageResult<Question>;

    async fn get_question(&self, id: QuestionId) -> StorageResult<Option<Question>>;

    /// Questions carrying `tag_name` with any of `values` (any value at all
    /// when `values` is empty), ascending by id.
    async fn find_by_tag(&self, tag_name: &str, values: &[String]) -> StorageResult<Vec<Question>>;

    /// Replace the full tag set of a question and bump its version.
    ///
    /// Returns `Ok(false)` on a version mismatch and `Err(StorageError::NotFound)`
    /// when the question no longer exists.
    async fn replace_tags(
        &self,
        id: QuestionId,
        expected_version: i64,
        tags: &TagSet,
    ) -> StorageResult<bool>;
}
