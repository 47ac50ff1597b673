use axum::extract::State;
use dialog_core::domain::health::{entities::EngineStatus, ports::HealthCheckService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    ModelNotLoaded,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub model_loaded: bool,
    pub foods_count: usize,
    pub version: String,
}

impl From<EngineStatus> for HealthResponse {
    fn from(status: EngineStatus) -> Self {
        Self {
            status: if status.model_loaded {
                HealthStatus::Healthy
            } else {
                HealthStatus::ModelNotLoaded
            },
            model_loaded: status.model_loaded,
            foods_count: status.foods_count,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Engine health",
    responses(
        (status = 200, body = HealthResponse)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Result<Response<HealthResponse>, ApiError> {
    Ok(Response::OK(HealthResponse::from(state.service.engine_status())))
}
