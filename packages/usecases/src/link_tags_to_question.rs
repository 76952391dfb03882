// ABOUTME: Link tag values to a question
// ABOUTME: Idempotent union of values under one tag name, persisted atomically

use std::sync::Arc;

use kb_core::QuestionId;
use kb_storage::QuestionStore;
use kb_tags::{link_values, TagChange};
use tracing::info;

use crate::error::UseCaseResult;
use crate::tag_mutation::mutate_tags;

#[derive(Debug, Clone)]
pub struct LinkTagsRequest {
    pub question_id: QuestionId,
    pub tag_name: String,
    pub tag_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTagsResponse {
    pub question_id: QuestionId,
    pub tag_name: String,
    /// Every value of the tag after linking
    pub values: Vec<String>,
    pub added: usize,
    pub ignored: usize,
}

#[derive(Clone)]
pub struct LinkTagsToQuestionHandler {
    store: Arc<dyn QuestionStore>,
}

impl LinkTagsToQuestionHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, request: LinkTagsRequest) -> UseCaseResult<LinkTagsResponse> {
        let change = TagChange::new(&request.tag_name, &request.tag_values)?;

        let outcome = mutate_tags(self.store.as_ref(), request.question_id, |tags| {
            Ok(link_values(tags, &change))
        })
        .await?;

        info!(
            "Linked {} value(s) to tag '{}' on question {}",
            outcome.added, outcome.tag_name, request.question_id
        );

        Ok(LinkTagsResponse {
            question_id: request.question_id,
            tag_name: outcome.tag_name,
            values: outcome.values,
            added: outcome.added,
            ignored: outcome.ignored,
        })
    }
}
