use axum::extract::State;
use dialog_core::domain::prediction::{entities::PredictionResult, ports::MealSafetyService};

use crate::application::http::{
    prediction::validators::PredictMealRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    summary = "Predict meal safety",
    description = "Classifies one portion of a dish as safe, caution or unsafe for the given user. Guardrail rules always win over the risk model; when no model is available the result is marked `guardrails_only`.",
    request_body = PredictMealRequest,
    responses(
        (status = 200, body = PredictionResult),
        (status = 400, body = ApiErrorResponse, description = "Invalid quantity, BMI or payload"),
        (status = 404, body = ApiErrorResponse, description = "Unknown dish, with suggestions")
    )
)]
pub async fn predict_meal(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<PredictMealRequest>,
) -> Result<Response<PredictionResult>, ApiError> {
    let input = payload.into_input().map_err(ApiError::from)?;

    let result = state
        .service
        .predict_meal(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
