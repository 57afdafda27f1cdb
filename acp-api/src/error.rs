use acp_core::CheckoutError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// `Json` extractor whose rejections use the `{"error": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::NotFound(_) => AppError::NotFoundError("not_found".to_string()),
            CheckoutError::InvalidTransition { .. } | CheckoutError::AlreadyCanceled => {
                AppError::ConflictError(err.to_string())
            }
            CheckoutError::InvalidState(ref detail) => {
                tracing::error!("Session invariant broken: {}", detail);
                AppError::ValidationError("invalid_state".to_string())
            }
            CheckoutError::UnknownSku(_)
            | CheckoutError::Validation(_)
            | CheckoutError::AmountOverflow(_) => AppError::ValidationError(err.to_string()),
            CheckoutError::Storage(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acp_core::checkout::SessionStatus;

    fn status_of(err: CheckoutError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(CheckoutError::NotFound("cs_1".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(CheckoutError::InvalidTransition {
                action: "update",
                status: SessionStatus::Completed
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(CheckoutError::AlreadyCanceled), StatusCode::CONFLICT);
        assert_eq!(status_of(CheckoutError::InvalidState("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CheckoutError::UnknownSku("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CheckoutError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(CheckoutError::Storage("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
