// ABOUTME: Add question use case
// ABOUTME: Validates text fields, seeds tags with link semantics and persists the question

use std::collections::BTreeMap;
use std::sync::Arc;

use kb_core::{validate_answer_text, validate_question_text, Question, QuestionCreateInput};
use kb_storage::QuestionStore;
use kb_tags::build_tag_set;
use tracing::info;

use crate::error::{UseCaseError, UseCaseResult};

#[derive(Debug, Clone, Default)]
pub struct AddQuestionRequest {
    pub question: String,
    pub answer: String,
    /// Tags to link at creation time, tag name -> values
    pub tags: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct AddQuestionResponse {
    pub question: Question,
}

#[derive(Clone)]
pub struct AddQuestionHandler {
    store: Arc<dyn QuestionStore>,
}

impl AddQuestionHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, request: AddQuestionRequest) -> UseCaseResult<AddQuestionResponse> {
        let question = validate_question_text(&request.question)
            .map_err(|e| UseCaseError::InvalidQuestion(e.to_string()))?;
        let answer = validate_answer_text(&request.answer)
            .map_err(|e| UseCaseError::InvalidQuestion(e.to_string()))?;
        let tags = build_tag_set(request.tags)?;

        let created = self
            .store
            .create_question(QuestionCreateInput {
                question,
                answer,
                tags,
            })
            .await?;

        info!("Added question {} with {} tags", created.id, created.tags.len());

        Ok(AddQuestionResponse { question: created })
    }
}
