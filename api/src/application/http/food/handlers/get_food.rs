use axum::extract::{Path, State};
use dialog_core::domain::food::{FoodCategory, FoodDetails, FoodService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NutritionPerServing {
    pub serving_size_g: f64,
    pub carbs_g: f64,
    pub sugar_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub calories_kcal: f64,
    pub glycemic_index: f64,
    pub glycemic_load: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SafetyInfo {
    pub avoid_for_diabetic: bool,
    pub safe_threshold_sugar: f64,
    pub risky_threshold_sugar: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetFoodResponse {
    pub food_name: String,
    pub category: FoodCategory,
    pub nutrition: NutritionPerServing,
    pub safety: SafetyInfo,
}

impl From<FoodDetails> for GetFoodResponse {
    fn from(details: FoodDetails) -> Self {
        let food = details.food;

        Self {
            nutrition: NutritionPerServing {
                serving_size_g: food.serving_size_g,
                carbs_g: food.carbs_g,
                sugar_g: food.sugar_g,
                protein_g: food.protein_g,
                fat_g: food.fat_g,
                fiber_g: food.fiber_g,
                calories_kcal: food.calories_kcal,
                glycemic_index: food.glycemic_index,
                glycemic_load: food.glycemic_load,
            },
            safety: SafetyInfo {
                avoid_for_diabetic: food.avoid_for_condition,
                safe_threshold_sugar: food.safe_threshold_sugar,
                risky_threshold_sugar: food.risky_threshold_sugar,
            },
            food_name: food.name,
            category: details.category,
        }
    }
}

#[utoipa::path(
    get,
    path = "/{food_name}",
    tag = "food",
    summary = "Get food",
    description = "Per-serving nutrition and diabetes safety info for one dish. Matching falls back to case-insensitive.",
    params(
        ("food_name" = String, Path, description = "Dish name"),
    ),
    responses(
        (status = 200, body = GetFoodResponse),
        (status = 404, body = ApiErrorResponse, description = "Unknown dish, with suggestions")
    )
)]
pub async fn get_food(
    Path(food_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetFoodResponse>, ApiError> {
    let details = state
        .service
        .get_food(&food_name)
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetFoodResponse::from(details)))
}
