use acp_core::checkout::CheckoutSession;
use acp_order::{
    CompleteSessionRequest, CompletionOutcome, CreateSessionRequest, UpdateSessionRequest,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::error::{AppError, AppJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkout_sessions", post(create_session))
        .route(
            "/checkout_sessions/{id}",
            post(update_session).get(get_session),
        )
        .route("/checkout_sessions/{id}/complete", post(complete_session))
        .route("/checkout_sessions/{id}/cancel", post(cancel_session))
}

/// POST /checkout_sessions
pub async fn create_session(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CheckoutSession>), AppError> {
    let session = state.sessions.create(req).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /checkout_sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CheckoutSession>, AppError> {
    Ok(Json(state.sessions.get(&session_id).await?))
}

/// POST /checkout_sessions/:id
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<UpdateSessionRequest>,
) -> Result<Json<CheckoutSession>, AppError> {
    Ok(Json(state.sessions.update(&session_id, req).await?))
}

/// POST /checkout_sessions/:id/complete
/// A declined payment answers 402 with the session (carrying the error
/// message) as the body.
pub async fn complete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<CompleteSessionRequest>,
) -> Result<(StatusCode, Json<CheckoutSession>), AppError> {
    let outcome = state.sessions.complete(&session_id, req).await?;
    let status = match outcome {
        CompletionOutcome::Completed(_) => StatusCode::OK,
        CompletionOutcome::Declined(_) => StatusCode::PAYMENT_REQUIRED,
    };
    Ok((status, Json(outcome.into_session())))
}

/// POST /checkout_sessions/:id/cancel
pub async fn cancel_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CheckoutSession>, AppError> {
    Ok(Json(state.sessions.cancel(&session_id).await?))
}
