use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dialog_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{message}")]
    NotFound {
        message: String,
        suggestions: Vec<String>,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        if !error.is_client_error() {
            tracing::error!("Request failed: {}", error);
        }

        match error {
            CoreError::NotFound { ref suggestions, .. } => ApiError::NotFound {
                suggestions: suggestions.clone(),
                message: error.to_string(),
            },
            CoreError::InvalidQuantity(_) => ApiError::BadRequest(error.to_string()),
            CoreError::ClassifierUnavailable(_) | CoreError::ExternalServiceError(_) => {
                ApiError::ServiceUnavailable(error.to_string())
            }
            CoreError::InvalidModel(_)
            | CoreError::Dataset(_)
            | CoreError::Persistence(_)
            | CoreError::InternalServerError => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, suggestions) = match self {
            ApiError::NotFound {
                message,
                suggestions,
            } => (StatusCode::NOT_FOUND, "E_NOT_FOUND", message, Some(suggestions)),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "E_BAD_REQUEST", message, None)
            }
            ApiError::ServiceUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "E_SERVICE_UNAVAILABLE",
                message,
                None,
            ),
            ApiError::InternalServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "E_INTERNAL_SERVER_ERROR",
                message,
                None,
            ),
        };

        let body = ApiErrorResponse {
            code: code.to_string(),
            message,
            status: status.as_u16(),
            suggestions,
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that runs `validator` rules before the handler sees the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(format!("Validation failed: {}", e)))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_suggestions() {
        let error = ApiError::from(CoreError::NotFound {
            query: "dal".to_string(),
            suggestions: vec!["Mixed dal".to_string()],
        });

        assert_eq!(
            error,
            ApiError::NotFound {
                message: "Food 'dal' not found. Did you mean: Mixed dal".to_string(),
                suggestions: vec!["Mixed dal".to_string()],
            }
        );
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (CoreError::InvalidQuantity("0".into()), StatusCode::BAD_REQUEST),
            (
                CoreError::ExternalServiceError("timeout".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CoreError::Persistence("disk full".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (core_error, status) in cases {
            let response = ApiError::from(core_error).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
