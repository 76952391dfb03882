use std::sync::Arc;

use kb_core::{Question, QuestionId};
use kb_storage::QuestionStore;

use crate::error::{UseCaseError, UseCaseResult};

#[derive(Debug, Clone, Copy)]
pub struct ObtainQuestionByIdentifierRequest {
    pub id: QuestionId,
}

#[derive(Debug, Clone)]
pub struct ObtainQuestionByIdentifierResponse {
    pub question: Question,
}

#[derive(Clone)]
pub struct ObtainQuestionByIdentifierHandler {
    store: Arc<dyn QuestionStore>,
}

impl ObtainQuestionByIdentifierHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        request: ObtainQuestionByIdentifierRequest,
    ) -> UseCaseResult<ObtainQuestionByIdentifierResponse> {
        let question = self
            .store
            .get_question(request.id)
            .await?
            .ok_or(UseCaseError::QuestionNotFound(request.id))?;

        Ok(ObtainQuestionByIdentifierResponse { question })
    }
}
