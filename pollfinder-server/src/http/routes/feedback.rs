//! Reviewer feedback endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;

/// Feedback request body. Presence and values are checked by the service.
///
/// `id` is taken as any JSON value so ids listed by `GET /api/polls` can be
/// posted back as they were returned.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackAck {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/feedback
async fn update_feedback(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<FeedbackRequest>,
) -> Result<Json<FeedbackAck>, ApiError> {
    state
        .service
        .set_feedback(req.id, req.feedback.as_deref())
        .await?;

    Ok(Json(FeedbackAck {
        success: true,
        message: "Feedback updated",
    }))
}

/// Feedback routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/feedback", post(update_feedback))
}
