// ABOUTME: Optimistic read-modify-write loop for tag mutations
// ABOUTME: Re-reads and retries when another writer bumped the question version first

use kb_core::{QuestionId, TagSet};
use kb_storage::{QuestionStore, StorageError};
use kb_tags::TagError;
use tracing::{debug, warn};

use crate::error::{UseCaseError, UseCaseResult};

/// How many read-modify-write rounds a single tag mutation may take
pub const MAX_TAG_MUTATION_ATTEMPTS: usize = 5;

/// Apply `apply` to the current tags of question `id` and persist the result.
///
/// `apply` may run more than once, each time on a fresh copy of the stored
/// tags. When it leaves the tags unchanged nothing is written.
pub(crate) async fn mutate_tags<T, F>(
    store: &dyn QuestionStore,
    id: QuestionId,
    mut apply: F,
) -> UseCaseResult<T>
where
    F: FnMut(&mut TagSet) -> Result<T, TagError> + Send,
    T: Send,
{
    for attempt in 1..=MAX_TAG_MUTATION_ATTEMPTS {
        let question = store
            .get_question(id)
            .await?
            .ok_or(UseCaseError::QuestionNotFound(id))?;

        let mut tags = question.tags.clone();
        let outcome = apply(&mut tags)?;

        if tags == question.tags {
            debug!("Tags of question {} unchanged, skipping write", id);
            return Ok(outcome);
        }

        match store.replace_tags(id, question.version, &tags).await {
            Ok(true) => return Ok(outcome),
            Ok(false) => {
                warn!(
                    question_id = id,
                    attempt,
                    "Concurrent tag modification detected, retrying"
                );
            }
            Err(StorageError::NotFound) => return Err(UseCaseError::QuestionNotFound(id)),
            Err(e) => return Err(e.into()),
        }
    }

    Err(UseCaseError::ConcurrentModification {
        id,
        attempts: MAX_TAG_MUTATION_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kb_core::Question;
    use kb_storage::MockQuestionStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn question(version: i64) -> Question {
        let mut tags = TagSet::new();
        tags.insert("color", "red");
        Question {
            id: 1,
            question: "Q?".to_string(),
            answer: "A".to_string(),
            tags,
            version,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn add_blue(tags: &mut TagSet) -> Result<bool, TagError> {
        Ok(tags.insert("color", "blue"))
    }

    #[tokio::test]
    async fn test_retries_after_version_conflict() {
        let reads = Arc::new(AtomicUsize::new(0));
        let reads_in_mock = reads.clone();

        let mut store = MockQuestionStore::new();
        store.expect_get_question().returning(move |_| {
            let version = reads_in_mock.fetch_add(1, Ordering::SeqCst) as i64;
            Ok(Some(question(version)))
        });
        // First write loses the race, second one wins
        store
            .expect_replace_tags()
            .times(2)
            .returning(|_, version, _| Ok(version == 1));

        let added = mutate_tags(&store, 1, add_blue).await.unwrap();

        assert!(added);
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut store = MockQuestionStore::new();
        store
            .expect_get_question()
            .times(MAX_TAG_MUTATION_ATTEMPTS)
            .returning(|_| Ok(Some(question(0))));
        store
            .expect_replace_tags()
            .times(MAX_TAG_MUTATION_ATTEMPTS)
            .returning(|_, _, _| Ok(false));

        let result = mutate_tags(&store, 1, add_blue).await;

        match result {
            Err(UseCaseError::ConcurrentModification { id, attempts }) => {
                assert_eq!(id, 1);
                assert_eq!(attempts, MAX_TAG_MUTATION_ATTEMPTS);
            }
            other => panic!("expected ConcurrentModification, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unchanged_tags_are_not_written() {
        let mut store = MockQuestionStore::new();
        store
            .expect_get_question()
            .returning(|_| Ok(Some(question(3))));
        store.expect_replace_tags().never();

        let added = mutate_tags(&store, 1, |tags: &mut TagSet| Ok(tags.insert("color", "red")))
            .await
            .unwrap();

        assert!(!added);
    }

    #[tokio::test]
    async fn test_missing_question() {
        let mut store = MockQuestionStore::new();
        store.expect_get_question().returning(|_| Ok(None));
        store.expect_replace_tags().never();

        let result = mutate_tags(&store, 7, add_blue).await;
        assert!(matches!(result, Err(UseCaseError::QuestionNotFound(7))));
    }

    #[tokio::test]
    async fn test_question_deleted_between_read_and_write() {
        let mut store = MockQuestionStore::new();
        store
            .expect_get_question()
            .returning(|_| Ok(Some(question(0))));
        store
            .expect_replace_tags()
            .returning(|_, _, _| Err(StorageError::NotFound));

        let result = mutate_tags(&store, 1, add_blue).await;
        assert!(matches!(result, Err(UseCaseError::QuestionNotFound(1))));
    }

    #[tokio::test]
    async fn test_engine_error_aborts_without_write() {
        let mut store = MockQuestionStore::new();
        store
            .expect_get_question()
            .returning(|_| Ok(Some(question(0))));
        store.expect_replace_tags().never();

        let result: UseCaseResult<()> = mutate_tags(&store, 1, |_: &mut TagSet| {
            Err(TagError::TagNotFound("size".to_string()))
        })
        .await;

        assert!(matches!(result, Err(UseCaseError::TagNotFound(name)) if name == "size"));
    }
}
