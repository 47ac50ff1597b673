use crate::application::http::{
    food::router::FoodApiDoc, health::router::HealthApiDoc,
    prediction::router::PredictionApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DiaLog API",
        description = "Portion-aware meal-safety predictions for people managing diabetes"
    ),
    nest(
        (path = "/foods", api = FoodApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document with every path prefixed by `root_path`.
pub fn api_doc(root_path: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(PredictionApiDoc::openapi());

    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", root_path), item))
        .collect();
    openapi.paths = paths;

    openapi
}
