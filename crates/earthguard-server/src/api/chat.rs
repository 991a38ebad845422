use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use earthguard_gemini::{FailureKind, SuggestedQuestion, FALLBACK_MESSAGE, SUGGESTED_QUESTIONS};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ChatRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatAnswer {
    /// Markdown answer, or the fallback message when `is_error` is set.
    pub answer: String,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
}

/// Upstream failures are answered with the fallback text and `200 OK`.
pub(super) async fn ask(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ChatAnswer>>, ApiError> {
    let Json(body) = payload
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    if body.question.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "question must not be empty",
        ));
    }
    let Some(gateway) = state.chat.as_ref() else {
        return Err(ApiError::new(
            req_id.0,
            "service_unavailable",
            "chat assistant is not configured (GEMINI_API_KEY unset)",
        ));
    };

    let data = match gateway.ask(&body.question).await {
        Ok(answer) => ChatAnswer {
            answer,
            is_error: false,
            error_kind: None,
        },
        Err(err) => ChatAnswer {
            answer: FALLBACK_MESSAGE.to_string(),
            is_error: true,
            error_kind: Some(err.failure_kind().unwrap_or(FailureKind::Transient)),
        },
    };

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn suggestions(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<&'static [SuggestedQuestion]>> {
    Json(ApiResponse::new(&SUGGESTED_QUESTIONS[..], req_id.0))
}
