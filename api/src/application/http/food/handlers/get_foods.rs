use axum::extract::{Query, State};
use dialog_core::domain::food::FoodService;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetFoodsQuery {
    /// Case-insensitive substring filter on the dish name.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetFoodsResponse {
    pub foods: Vec<String>,
    pub count: usize,
}

#[utoipa::path(
    get,
    path = "",
    tag = "food",
    summary = "List foods",
    description = "Sorted dish names from the reference table, optionally filtered.",
    params(GetFoodsQuery),
    responses(
        (status = 200, body = GetFoodsResponse)
    )
)]
pub async fn get_foods(
    State(state): State<AppState>,
    Query(query): Query<GetFoodsQuery>,
) -> Result<Response<GetFoodsResponse>, ApiError> {
    let search = query.search.filter(|term| !term.trim().is_empty());
    let foods = state.service.search_foods(search);

    Ok(Response::OK(GetFoodsResponse {
        count: foods.len(),
        foods,
    }))
}
