use super::handlers::{
    log_meals::{__path_log_meals, log_meals},
    predict_meal::{__path_predict_meal, predict_meal},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(predict_meal, log_meals))]
pub struct PredictionApiDoc;

pub fn prediction_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/predict", state.args.server.root_path),
            post(predict_meal),
        )
        .route(
            &format!("{}/meal-logs", state.args.server.root_path),
            post(log_meals),
        )
}
