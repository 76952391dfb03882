// ABOUTME: Query questions by a linked tag name and optional values
// ABOUTME: Empty value list matches any value; results are ascending by id

use std::sync::Arc;

use kb_core::Question;
use kb_storage::QuestionStore;
use kb_tags::TagQuery;
use tracing::debug;

use crate::error::UseCaseResult;

#[derive(Debug, Clone, Default)]
pub struct ObtainQuestionsByLinkedTagsRequest {
    pub tag_name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ObtainQuestionsByLinkedTagsResponse {
    pub questions: Vec<Question>,
}

#[derive(Clone)]
pub struct ObtainQuestionsByLinkedTagsHandler {
    store: Arc<dyn QuestionStore>,
}

impl ObtainQuestionsByLinkedTagsHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        request: ObtainQuestionsByLinkedTagsRequest,
    ) -> UseCaseResult<ObtainQuestionsByLinkedTagsResponse> {
        let query = TagQuery::new(&request.tag_name, &request.values)?;

        let questions = self
            .store
            .find_by_tag(query.name(), query.values())
            .await?;

        debug!("Tag '{}' matched {} questions", query.name(), questions.len());

        Ok(ObtainQuestionsByLinkedTagsResponse { questions })
    }
}
