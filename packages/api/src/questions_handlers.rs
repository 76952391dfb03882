// ABOUTME: HTTP request handlers for question operations
// ABOUTME: Add/get questions, query by linked tag, link and withdraw tag values

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json as ResponseJson,
    Json,
};
use kb_core::{Question, QuestionId};
use kb_usecases::{ObtainQuestionByIdentifierRequest, ObtainQuestionsByLinkedTagsRequest};
use tracing::info;

use crate::dto::{
    AddQuestionDto, AddQuestionResultDto, LinkTagsResultDto, TagValuesChangeDto,
    WithdrawTagsResultDto,
};
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::ApiState;

/// Header carrying the accepted values for the by-linked-tag query
pub const TAG_VALUES_HEADER: &str = "x-tag-values";

/// Collect tag values from every `x-tag-values` header, splitting on commas
fn tag_values_from_headers(headers: &HeaderMap) -> ApiResult<Vec<String>> {
    let mut values = Vec::new();

    for header in headers.get_all(TAG_VALUES_HEADER) {
        // Tag values may be any UTF-8 text, so decode the raw bytes
        let raw = std::str::from_utf8(header.as_bytes())
            .map_err(|_| ApiError::validation("x-tag-values header must be valid UTF-8"))?;

        values.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        );
    }

    Ok(values)
}

/// Create a question, optionally with tags
pub async fn add_question(
    State(state): State<ApiState>,
    Json(body): Json<AddQuestionDto>,
) -> ApiResult<ResponseJson<ApiResponse<AddQuestionResultDto>>> {
    info!("Adding question ({} tags)", body.tags.len());

    let response = state.use_cases.add_question.handle(body.into()).await?;

    Ok(ResponseJson(ApiResponse::success(response.into())))
}

/// Get a single question by ID
pub async fn get_question(
    State(state): State<ApiState>,
    Path(id): Path<QuestionId>,
) -> ApiResult<ResponseJson<ApiResponse<Question>>> {
    info!("Getting question: {}", id);

    let response = state
        .use_cases
        .obtain_question_by_identifier
        .handle(ObtainQuestionByIdentifierRequest { id })
        .await?;

    Ok(ResponseJson(ApiResponse::success(response.question)))
}

/// List questions linked to a tag, filtered by the values in `x-tag-values`
pub async fn get_questions_by_linked_tag(
    State(state): State<ApiState>,
    Path(tag): Path<String>,
    headers: HeaderMap,
) -> ApiResult<ResponseJson<ApiResponse<Vec<Question>>>> {
    let values = tag_values_from_headers(&headers)?;
    info!("Listing questions by tag: {} (values: {:?})", tag, values);

    let response = state
        .use_cases
        .obtain_questions_by_linked_tags
        .handle(ObtainQuestionsByLinkedTagsRequest {
            tag_name: tag,
            values,
        })
        .await?;

    Ok(ResponseJson(ApiResponse::success(response.questions)))
}

/// Link values to a tag of a question
pub async fn link_tags_to_question(
    State(state): State<ApiState>,
    Path(question_id): Path<QuestionId>,
    Json(body): Json<TagValuesChangeDto>,
) -> ApiResult<ResponseJson<ApiResponse<LinkTagsResultDto>>> {
    info!("Linking tag '{}' to question: {}", body.tag_name, question_id);

    let response = state
        .use_cases
        .link_tags_to_question
        .handle(body.into_link_request(question_id))
        .await?;

    Ok(ResponseJson(ApiResponse::success(response.into())))
}

/// Withdraw values from a tag of a question
pub async fn withdraw_tags_from_question(
    State(state): State<ApiState>,
    Path(question_id): Path<QuestionId>,
    Json(body): Json<TagValuesChangeDto>,
) -> ApiResult<ResponseJson<ApiResponse<WithdrawTagsResultDto>>> {
    info!("Withdrawing tag '{}' from question: {}", body.tag_name, question_id);

    let response = state
        .use_cases
        .withdraw_tags_from_question
        .handle(body.into_withdraw_request(question_id))
        .await?;

    Ok(ResponseJson(ApiResponse::success(response.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use axum::{
        body::Body,
        http::{HeaderValue, Method, Request, StatusCode},
        Router,
    };
    use kb_storage::SqliteQuestionStore;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn setup_app() -> Router {
        let store = SqliteQuestionStore::in_memory().await.unwrap();
        create_router(ApiState::new(Arc::new(store)))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create_question(app: &Router, body: Value) -> i64 {
        let (status, json) = send(app, json_request(Method::POST, "/questions", body)).await;
        assert_eq!(status, StatusCode::OK);
        json["data"]["id"].as_i64().unwrap()
    }

    #[test]
    fn test_tag_values_header_parsing() {
        let mut headers = HeaderMap::new();
        headers.append(TAG_VALUES_HEADER, "red, blue".parse().unwrap());
        headers.append(TAG_VALUES_HEADER, "green,,".parse().unwrap());

        let values = tag_values_from_headers(&headers).unwrap();
        assert_eq!(values, vec!["red", "blue", "green"]);

        assert!(tag_values_from_headers(&HeaderMap::new()).unwrap().is_empty());
    }

    #[test]
    fn test_tag_values_header_accepts_utf8() {
        let mut headers = HeaderMap::new();
        headers.append(
            TAG_VALUES_HEADER,
            HeaderValue::from_bytes("español, 日本語".as_bytes()).unwrap(),
        );

        let values = tag_values_from_headers(&headers).unwrap();
        assert_eq!(values, vec!["español", "日本語"]);
    }

    #[test]
    fn test_tag_values_header_rejects_invalid_utf8() {
        let mut headers = HeaderMap::new();
        headers.append(TAG_VALUES_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());

        assert!(matches!(
            tag_values_from_headers(&headers),
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_add_and_get_question() {
        let app = setup_app().await;

        let (status, json) = send(
            &app,
            json_request(
                Method::POST,
                "/questions",
                json!({
                    "question": "What is ownership?",
                    "answer": "A set of rules governing memory",
                    "tags": { "topic": ["rust", "rust"], "level": "intro" }
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["question"], "What is ownership?");
        assert_eq!(json["data"]["tags"], json!({"level": ["intro"], "topic": ["rust"]}));

        let id = json["data"]["id"].as_i64().unwrap();
        let request = Request::builder()
            .uri(format!("/questions/{}", id))
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], id);
        assert_eq!(json["data"]["answer"], "A set of rules governing memory");
        assert!(json["data"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_add_question_with_empty_text() {
        let app = setup_app().await;

        let (status, json) = send(
            &app,
            json_request(
                Method::POST,
                "/questions",
                json!({ "question": "", "answer": "a" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_QUESTION");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_get_missing_question() {
        let app = setup_app().await;

        let request = Request::builder()
            .uri("/questions/999")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "QUESTION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_link_and_withdraw_tags() {
        let app = setup_app().await;
        let id = create_question(&app, json!({ "question": "Q?", "answer": "A" })).await;

        let (status, json) = send(
            &app,
            json_request(
                Method::PATCH,
                &format!("/questions/{}/linkTag", id),
                json!({ "tagName": "color", "tagValues": ["red", "red", "blue"] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["questionId"], id);
        assert_eq!(json["data"]["tagValues"], json!(["red", "blue"]));
        assert_eq!(json["data"]["addedCount"], 2);
        assert_eq!(json["data"]["ignoredCount"], 1);

        let (status, json) = send(
            &app,
            json_request(
                Method::PATCH,
                &format!("/questions/{}/withdrawTags", id),
                json!({ "tagName": "color", "tagValues": ["red", "blue"] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["removedCount"], 2);
        assert_eq!(json["data"]["tagRemoved"], true);
        assert_eq!(json["data"]["tagValues"], json!([]));
    }

    #[tokio::test]
    async fn test_withdraw_from_missing_tag() {
        let app = setup_app().await;
        let id = create_question(&app, json!({ "question": "Q?", "answer": "A" })).await;

        let (status, json) = send(
            &app,
            json_request(
                Method::PATCH,
                &format!("/questions/{}/withdrawTags", id),
                json!({ "tagName": "color", "tagValues": ["red"] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "TAG_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_link_with_empty_values() {
        let app = setup_app().await;
        let id = create_question(&app, json!({ "question": "Q?", "answer": "A" })).await;

        let (status, json) = send(
            &app,
            json_request(
                Method::PATCH,
                &format!("/questions/{}/linkTag", id),
                json!({ "tagName": "color", "tagValues": [] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_TAG");
    }

    #[tokio::test]
    async fn test_get_questions_by_linked_tag() {
        let app = setup_app().await;
        let red = create_question(
            &app,
            json!({ "question": "Red?", "answer": "A", "tags": { "color": ["red"] } }),
        )
        .await;
        let blue = create_question(
            &app,
            json!({ "question": "Blue?", "answer": "A", "tags": { "color": "blue" } }),
        )
        .await;
        create_question(&app, json!({ "question": "Plain?", "answer": "A" })).await;

        let request = Request::builder()
            .uri("/questions/byLinkedTags/color")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![red, blue]);

        let request = Request::builder()
            .uri("/questions/byLinkedTags/color")
            .header(TAG_VALUES_HEADER, "red")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], red);
    }

    #[tokio::test]
    async fn test_get_questions_by_non_ascii_tag_value() {
        let app = setup_app().await;
        let spanish = create_question(
            &app,
            json!({ "question": "¿Qué?", "answer": "A", "tags": { "lang": ["español"] } }),
        )
        .await;
        create_question(
            &app,
            json!({ "question": "What?", "answer": "A", "tags": { "lang": ["english"] } }),
        )
        .await;

        let request = Request::builder()
            .uri("/questions/byLinkedTags/lang")
            .header(
                TAG_VALUES_HEADER,
                HeaderValue::from_bytes("español".as_bytes()).unwrap(),
            )
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], spanish);
        assert_eq!(data[0]["tags"]["lang"], json!(["español"]));
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = setup_app().await;

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
    }
}
