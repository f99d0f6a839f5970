use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorBody;

/// The one failure the service reports: a 500 carrying the cause the
/// failing layer gave, verbatim.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn cause(&self) -> String {
        self.0.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.cause();
        tracing::error!(error = %message, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { message }),
        )
            .into_response()
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Body rejections collapse into the same 500 as storage failures.
pub fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError(anyhow::anyhow!(rejection.body_text()))
}

pub fn path_rejection(rejection: PathRejection) -> AppError {
    AppError(anyhow::anyhow!(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_into_response_is_500_with_cause() {
        let err = AppError::from(anyhow::anyhow!("Record to delete does not exist."));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Record to delete does not exist.");
    }
}
