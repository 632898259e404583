use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use unmutte_db::StoreError;
use unmutte_types::api::{ErrorBody, FieldError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed parsing or field rules. Raised before any handler
    /// logic runs.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(fields) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { detail: fields })).into_response()
            }
            ApiError::Store(StoreError::Unavailable(msg)) => {
                error!("Store unavailable: {}", msg);
                detail(StatusCode::SERVICE_UNAVAILABLE, "Database not available")
            }
            ApiError::Store(StoreError::Operation(msg)) => {
                error!("Store operation failed: {}", msg);
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(ErrorBody { detail: msg.to_string() })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (ApiError::Validation(vec![]), StatusCode::UNPROCESSABLE_ENTITY),
            (
                ApiError::Store(StoreError::Unavailable("down".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Store(StoreError::Operation("disk full".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Internal("join".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
