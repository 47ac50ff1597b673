use axum::extract::State;
use dialog_core::domain::prediction::{
    ports::MealSafetyService,
    value_objects::{MealLogInput, MealLogOutcome},
};

use crate::application::http::{
    prediction::validators::MealLogRequest,
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
    path = "/meal-logs",
    tag = "prediction",
    summary = "Log a day of meals",
    description = "Predicts every meal, stores each prediction and a summary whose overall risk is the worst meal. Storage failures are reported through `persisted` and never fail the request.",
    request_body = MealLogRequest,
    responses(
        (status = 201, body = MealLogOutcome),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse)
    )
)]
pub async fn log_meals(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<MealLogRequest>,
) -> Result<Response<MealLogOutcome>, ApiError> {
    let outcome = state
        .service
        .log_meals(MealLogInput::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(outcome))
}
