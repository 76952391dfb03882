// ABOUTME: Withdraw tag values from a question
// ABOUTME: Absent values are ignored, a missing tag is an error, emptied tags are removed

use std::sync::Arc;

use kb_core::QuestionId;
use kb_storage::QuestionStore;
use kb_tags::{withdraw_values, TagChange};
use tracing::info;

use crate::error::UseCaseResult;
use crate::tag_mutation::mutate_tags;

#[derive(Debug, Clone)]
pub struct WithdrawTagsRequest {
    pub question_id: QuestionId,
    pub tag_name: String,
    pub tag_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawTagsResponse {
    pub question_id: QuestionId,
    pub tag_name: String,
    /// Values left on the tag, empty when the tag was removed
    pub remaining: Vec<String>,
    pub removed: usize,
    pub tag_removed: bool,
}

#[derive(Clone)]
pub struct WithdrawTagsFromQuestionHandler {
    store: Arc<dyn QuestionStore>,
}

impl WithdrawTagsFromQuestionHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        request: WithdrawTagsRequest,
    ) -> UseCaseResult<WithdrawTagsResponse> {
        let change = TagChange::new(&request.tag_name, &request.tag_values)?;

        let outcome = mutate_tags(self.store.as_ref(), request.question_id, |tags| {
            withdraw_values(tags, &change)
        })
        .await?;

        info!(
            "Withdrew {} value(s) from tag '{}' on question {} (tag removed: {})",
            outcome.removed, outcome.tag_name, request.question_id, outcome.tag_removed
        );

        Ok(WithdrawTagsResponse {
            question_id: request.question_id,
            tag_name: outcome.tag_name,
            remaining: outcome.remaining,
            removed: outcome.removed,
            tag_removed: outcome.tag_removed,
        })
    }
}
