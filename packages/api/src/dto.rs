// ABOUTME: Request and response bodies of the questions endpoints
// ABOUTME: Explicit conversions between HTTP DTOs and use-case records

use std::collections::BTreeMap;

use kb_core::{QuestionId, TagSet};
use kb_usecases::{
    AddQuestionRequest, AddQuestionResponse, LinkTagsRequest, LinkTagsResponse,
    WithdrawTagsRequest, WithdrawTagsResponse,
};
use serde::{Deserialize, Serialize};

/// A tag given either as a single value or as a list of values
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagValuesDto {
    One(String),
    Many(Vec<String>),
}

impl From<TagValuesDto> for Vec<String> {
    fn from(values: TagValuesDto) -> Self {
        match values {
            TagValuesDto::One(value) => vec![value],
            TagValuesDto::Many(values) => values,
        }
    }
}

/// Request body for creating a question
#[derive(Debug, Deserialize)]
pub struct AddQuestionDto {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: BTreeMap<String, TagValuesDto>,
}

impl From<AddQuestionDto> for AddQuestionRequest {
    fn from(dto: AddQuestionDto) -> Self {
        AddQuestionRequest {
            question: dto.question,
            answer: dto.answer,
            tags: dto
                .tags
                .into_iter()
                .map(|(name, values)| (name, values.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionResultDto {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub tags: TagSet,
}

impl From<AddQuestionResponse> for AddQuestionResultDto {
    fn from(response: AddQuestionResponse) -> Self {
        let question = response.question;
        AddQuestionResultDto {
            id: question.id,
            question: question.question,
            answer: question.answer,
            tags: question.tags,
        }
    }
}

/// Request body shared by linkTag and withdrawTags
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagValuesChangeDto {
    pub tag_name: String,
    pub tag_values: Vec<String>,
}

impl TagValuesChangeDto {
    pub fn into_link_request(self, question_id: QuestionId) -> LinkTagsRequest {
        LinkTagsRequest {
            question_id,
            tag_name: self.tag_name,
            tag_values: self.tag_values,
        }
    }

    pub fn into_withdraw_request(self, question_id: QuestionId) -> WithdrawTagsRequest {
        WithdrawTagsRequest {
            question_id,
            tag_name: self.tag_name,
            tag_values: self.tag_values,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTagsResultDto {
    pub question_id: QuestionId,
    pub tag_name: String,
    pub tag_values: Vec<String>,
    pub added_count: usize,
    pub ignored_count: usize,
}

impl From<LinkTagsResponse> for LinkTagsResultDto {
    fn from(response: LinkTagsResponse) -> Self {
        LinkTagsResultDto {
            question_id: response.question_id,
            tag_name: response.tag_name,
            tag_values: response.values,
            added_count: response.added,
            ignored_count: response.ignored,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawTagsResultDto {
    pub question_id: QuestionId,
    pub tag_name: String,
    pub tag_values: Vec<String>,
    pub removed_count: usize,
    pub tag_removed: bool,
}

impl From<WithdrawTagsResponse> for WithdrawTagsResultDto {
    fn from(response: WithdrawTagsResponse) -> Self {
        WithdrawTagsResultDto {
            question_id: response.question_id,
            tag_name: response.tag_name,
            tag_values: response.remaining,
            removed_count: response.removed,
            tag_removed: response.tag_removed,
        }
    }
}
