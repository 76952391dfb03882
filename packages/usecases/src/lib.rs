//! # Knowledge Base Use Cases
//!
//! One handler per operation. Each handler takes a typed request record,
//! runs the tag engine against the question store and returns a typed
//! response record; errors come back as [`UseCaseError`].

pub mod add_question;
pub mod error;
pub mod link_tags_to_question;
pub mod obtain_question_by_identifier;
pub mod obtain_questions_by_linked_tags;
pub mod tag_mutation;
pub mod withdraw_tags_from_question;

use std::sync::Arc;

use kb_storage::QuestionStore;

pub use add_question::{AddQuestionHandler, AddQuestionRequest, AddQuestionResponse};
pub use error::{UseCaseError, UseCaseResult};
pub use link_tags_to_question::{LinkTagsRequest, LinkTagsResponse, LinkTagsToQuestionHandler};
pub use obtain_question_by_identifier::{
    ObtainQuestionByIdentifierHandler, ObtainQuestionByIdentifierRequest,
    ObtainQuestionByIdentifierResponse,
};
pub use obtain_questions_by_linked_tags::{
    ObtainQuestionsByLinkedTagsHandler, ObtainQuestionsByLinkedTagsRequest,
    ObtainQuestionsByLinkedTagsResponse,
};
pub use tag_mutation::MAX_TAG_MUTATION_ATTEMPTS;
pub use withdraw_tags_from_question::{
    WithdrawTagsFromQuestionHandler, WithdrawTagsRequest, WithdrawTagsResponse,
};

/// Every use-case handler wired to the same question store
#[derive(Clone)]
pub struct UseCaseHandlers {
    pub add_question: AddQuestionHandler,
    pub obtain_question_by_identifier: ObtainQuestionByIdentifierHandler,
    pub obtain_questions_by_linked_tags: ObtainQuestionsByLinkedTagsHandler,
    pub link_tags_to_question: LinkTagsToQuestionHandler,
    pub withdraw_tags_from_question: WithdrawTagsFromQuestionHandler,
}

impl UseCaseHandlers {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            add_question: AddQuestionHandler::new(store.clone()),
            obtain_question_by_identifier: ObtainQuestionByIdentifierHandler::new(store.clone()),
            obtain_questions_by_linked_tags: ObtainQuestionsByLinkedTagsHandler::new(store.clone()),
            link_tags_to_question: LinkTagsToQuestionHandler::new(store.clone()),
            withdraw_tags_from_question: WithdrawTagsFromQuestionHandler::new(store),
        }
    }
}
