use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::prediction::entities::{
    Gender, MealLogSummary, MealTime, PredictionResult, UserContext,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PredictMealInput {
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub user: UserContext,
}

/// Demographics used for every meal in a log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealLogProfile {
    pub age: f64,
    pub gender: Gender,
    pub bmi: f64,
}

impl Default for MealLogProfile {
    fn default() -> Self {
        Self {
            age: 35.0,
            gender: Gender::Male,
            bmi: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealEntryInput {
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub meal_time: MealTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealLogInput {
    pub user_id: String,
    pub fasting_sugar: f64,
    pub post_meal_sugar: Option<f64>,
    pub profile: Option<MealLogProfile>,
    pub meals: Vec<MealEntryInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealLogOutcome {
    pub summary: MealLogSummary,
    pub predictions: Vec<PredictionResult>,
    /// False when any entry or the summary could not be written.
    pub persisted: bool,
}
