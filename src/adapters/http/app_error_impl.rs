use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app_error::{AppError, StoreErrorKind};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        let message = self.to_string();
        match self {
            AppError::InvalidEmail => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "message": message, "errors": errors })),
            )
                .into_response(),
            AppError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            AppError::AlreadyRegistered => (
                StatusCode::CONFLICT,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            AppError::CheckFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            AppError::Store(_) => {
                // NoRows carries an empty message and should never escape,
                // but a blank error page helps nobody.
                let message = if message.is_empty() {
                    StoreErrorKind::Other.user_message().to_string()
                } else {
                    message
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "message": message })),
                )
                    .into_response()
            }
            AppError::DraftNotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
