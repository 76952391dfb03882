// ABOUTME: SQLite implementation of the question store
// ABOUTME: Handles question creation, lookup, tag queries and versioned tag replacement

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
    SqliteSynchronous,
};
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::{QuestionStore, StorageConfig, StorageError, StorageResult};
use kb_core::{Question, QuestionCreateInput, QuestionId, TagSet};

const QUESTION_COLUMNS: &str = "id, question, answer, version, created_at, updated_at";
const TAG_COLUMNS: &str = "question_id, tag_name, tag_value";

pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file described by `config` and run migrations
    pub async fn connect(config: &StorageConfig) -> StorageResult<Self> {
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let journal_mode = if config.enable_wal {
            SqliteJournalMode::Wal
        } else {
            SqliteJournalMode::Delete
        };

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(journal_mode)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));

        debug!("Connecting to database: {}", config.path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database, used by tests.
    ///
    /// Each SQLite memory connection is its own database, so the pool is pinned
    /// to a single connection that never expires.
    pub async fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StorageError::Sqlx)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> StorageResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Convert a database row to a Question
    fn row_to_question(&self, row: &SqliteRow, tags: TagSet) -> StorageResult<Question> {
        Ok(Question {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            question: row.try_get("question").map_err(StorageError::Sqlx)?,
            answer: row.try_get("answer").map_err(StorageError::Sqlx)?,
            tags,
            version: row.try_get("version").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }
}

/// Append a subquery selecting the ids of questions carrying `tag_name` with
/// any of `values` (any value when `values` is empty).
///
/// Both the question query and the tag query of `find_by_tag` use it, so the
/// number of bound variables depends on `values` and never on the match count.
fn push_matching_ids<'args>(
    builder: &mut QueryBuilder<'args, Sqlite>,
    tag_name: &'args str,
    values: &'args [String],
) {
    builder.push("SELECT question_id FROM question_tags WHERE tag_name = ");
    builder.push_bind(tag_name);

    if !values.is_empty() {
        builder.push(" AND tag_value IN (");
        let mut separated = builder.separated(", ");
        for value in values {
            separated.push_bind(value.as_str());
        }
        separated.push_unseparated(")");
    }
}

/// Group `(question_id, tag_name, tag_value)` rows into one TagSet per question
fn collect_tags(rows: &[SqliteRow]) -> StorageResult<HashMap<QuestionId, TagSet>> {
    let mut tags: HashMap<QuestionId, TagSet> = HashMap::new();

    for row in rows {
        let question_id: QuestionId = row.try_get("question_id").map_err(StorageError::Sqlx)?;
        let name: String = row.try_get("tag_name").map_err(StorageError::Sqlx)?;
        let value: String = row.try_get("tag_value").map_err(StorageError::Sqlx)?;
        tags.entry(question_id).or_default().insert(&name, &value);
    }

    Ok(tags)
}

/// Write every (name, value) pair of `tags` for a question
async fn insert_tags(
    conn: &mut SqliteConnection,
    question_id: QuestionId,
    tags: &TagSet,
) -> StorageResult<()> {
    for (name, values) in tags.iter() {
        for (position, value) in values.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO question_tags (question_id, tag_name, tag_value, position)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(question_id)
            .bind(name)
            .bind(value)
            .bind(position as i64)
            .execute(&mut *conn)
            .await
            .map_err(StorageError::Sqlx)?;
        }
    }
    Ok(())
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn create_question(&self, input: QuestionCreateInput) -> StorageResult<Question> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let result = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, version, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            "#,
        )
        .bind(&input.question)
        .bind(&input.answer)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        let question_id = result.last_insert_rowid();
        debug!("Creating question: {} ({} tags)", question_id, input.tags.len());

        insert_tags(&mut tx, question_id, &input.tags).await?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_question(question_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn get_question(&self, id: QuestionId) -> StorageResult<Option<Question>> {
        debug!("Fetching question: {}", id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM questions WHERE id = ?",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let tag_rows = sqlx::query(&format!(
            "SELECT {} FROM question_tags WHERE question_id = ? ORDER BY tag_name, position",
            TAG_COLUMNS
        ))
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        let mut tags = collect_tags(&tag_rows)?;
        let question = self.row_to_question(&row, tags.remove(&id).unwrap_or_default())?;
        Ok(Some(question))
    }

    async fn find_by_tag(&self, tag_name: &str, values: &[String]) -> StorageResult<Vec<Question>> {
        debug!("Finding questions by tag: {} (values: {:?})", tag_name, values);

        // One read transaction so questions and their tags come from the same snapshot
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let mut question_query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM questions WHERE id IN (",
            QUESTION_COLUMNS
        ));
        push_matching_ids(&mut question_query, tag_name, values);
        question_query.push(") ORDER BY id");

        let rows = question_query
            .build()
            .fetch_all(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut tag_query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM question_tags WHERE question_id IN (",
            TAG_COLUMNS
        ));
        push_matching_ids(&mut tag_query, tag_name, values);
        tag_query.push(") ORDER BY question_id, tag_name, position");

        let tag_rows = tag_query
            .build()
            .fetch_all(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        let mut tags = collect_tags(&tag_rows)?;
        rows.iter()
            .map(|row| {
                let id: QuestionId = row.try_get("id").map_err(StorageError::Sqlx)?;
                self.row_to_question(row, tags.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn replace_tags(
        &self,
        id: QuestionId,
        expected_version: i64,
        tags: &TagSet,
    ) -> StorageResult<bool> {
        debug!("Replacing tags of question {} at version {}", id, expected_version);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let updated = sqlx::query(
            "UPDATE questions SET version = version + 1, updated_at = ? WHERE id = ? AND version = ?",
        )
        .bind(Utc::now())
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        if updated.rows_affected() == 0 {
            let exists: Option<QuestionId> =
                sqlx::query_scalar("SELECT id FROM questions WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(StorageError::Sqlx)?;

            tx.rollback().await.map_err(StorageError::Sqlx)?;

            return match exists {
                Some(_) => {
                    debug!("Version conflict on question {}", id);
                    Ok(false)
                }
                None => Err(StorageError::NotFound),
            };
        }

        sqlx::query("DELETE FROM question_tags WHERE question_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        insert_tags(&mut tx, id, tags).await?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(true)
    }
}
