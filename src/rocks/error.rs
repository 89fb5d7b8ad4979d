use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the rock endpoints.
///
/// Create-path failures respond with an `{"error": ...}` body, destroy-path
/// failures with `{"message": ...}`. Both shapes are part of the published
/// contract and clients depend on them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields.")]
    MissingFields,
    #[error("Weight must be a number.")]
    WeightNotNumeric,
    #[error("Type not found.")]
    TypeNotFound,
    #[error("Rock not found")]
    RockNotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingFields | ApiError::WeightNotNumeric => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::TypeNotFound => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            ApiError::RockNotFound => {
                (StatusCode::NOT_FOUND, json!({ "message": self.to_string() }))
            }
            ApiError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": e.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn missing_fields_maps_to_400_with_error_body() {
        let resp = ApiError::MissingFields.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({ "error": "Missing required fields." })
        );
    }

    #[tokio::test]
    async fn bad_weight_maps_to_400_with_error_body() {
        let resp = ApiError::WeightNotNumeric.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({ "error": "Weight must be a number." })
        );
    }

    #[tokio::test]
    async fn type_not_found_maps_to_404_with_error_body() {
        let resp = ApiError::TypeNotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, json!({ "error": "Type not found." }));
    }

    #[tokio::test]
    async fn rock_not_found_maps_to_404_with_message_body() {
        let resp = ApiError::RockNotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, json!({ "message": "Rock not found" }));
    }

    #[tokio::test]
    async fn database_error_maps_to_500_with_message_body() {
        let resp = ApiError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert!(body.get("message").is_some());
        assert!(body.get("error").is_none());
    }
}
