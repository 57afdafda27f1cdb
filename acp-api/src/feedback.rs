use acp_core::order::Feedback;
use acp_order::FeedbackRequest;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, AppJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/checkout_sessions/{id}/feedback",
        post(submit_feedback).get(get_feedback),
    )
}

/// POST /checkout_sessions/:id/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<FeedbackRequest>,
) -> Result<Json<Feedback>, AppError> {
    Ok(Json(state.sessions.submit_feedback(&session_id, req).await?))
}

/// GET /checkout_sessions/:id/feedback
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Feedback>, AppError> {
    Ok(Json(state.sessions.get_feedback(&session_id).await?))
}
