use dialog_core::domain::{
    common::entities::app_errors::CoreError,
    portion::parse_portion,
    prediction::{
        entities::{Gender, MealTime, UserContext, resolve_bmi},
        value_objects::{MealEntryInput, MealLogInput, MealLogProfile, PredictMealInput},
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_unit() -> String {
    "g".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PredictMealRequest {
    #[validate(length(min = 1, message = "food_name is required"))]
    pub food_name: String,

    /// Amount in `unit`. Either this or `portion` is required.
    #[serde(default)]
    pub quantity: Option<f64>,

    #[serde(default = "default_unit")]
    pub unit: String,

    /// Free-text portion such as `"1.5 cups"`; takes precedence over `quantity`/`unit`.
    #[serde(default)]
    pub portion: Option<String>,

    #[validate(range(min = 1.0, max = 120.0, message = "age must be between 1 and 120"))]
    pub age: f64,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default)]
    pub bmi: Option<f64>,

    #[serde(default)]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub height_cm: Option<f64>,

    #[validate(range(min = 0.0, message = "fasting_sugar must not be negative"))]
    pub fasting_sugar: f64,

    #[serde(default)]
    pub post_meal_sugar: Option<f64>,

    #[serde(default)]
    pub meal_time: Option<String>,
}

impl PredictMealRequest {
    pub fn into_input(self) -> Result<PredictMealInput, CoreError> {
        let (quantity, unit) = match (self.portion.as_deref(), self.quantity) {
            (Some(portion), _) => {
                let (quantity, unit) = parse_portion(portion)?;
                (quantity, unit.to_string())
            }
            (None, Some(quantity)) => (quantity, self.unit),
            (None, None) => {
                return Err(CoreError::InvalidQuantity(
                    "either quantity or portion is required".to_string(),
                ));
            }
        };

        let bmi = resolve_bmi(self.bmi, self.weight_kg, self.height_cm)?;

        Ok(PredictMealInput {
            food_name: self.food_name,
            quantity,
            unit,
            user: UserContext {
                age: self.age,
                gender: self.gender,
                bmi,
                fasting_sugar: self.fasting_sugar,
                post_meal_sugar: self.post_meal_sugar,
                meal_time: self
                    .meal_time
                    .as_deref()
                    .map(MealTime::parse_lenient)
                    .unwrap_or_default(),
            },
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MealEntryRequest {
    #[validate(length(min = 1, message = "food_name is required"))]
    pub food_name: String,

    pub quantity: f64,

    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default)]
    pub time_of_day: Option<String>,
}

impl From<MealEntryRequest> for MealEntryInput {
    fn from(entry: MealEntryRequest) -> Self {
        Self {
            food_name: entry.food_name,
            quantity: entry.quantity,
            unit: entry.unit,
            meal_time: entry
                .time_of_day
                .as_deref()
                .map(MealTime::parse_lenient)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MealLogRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    #[validate(range(min = 0.0, message = "fasting_sugar must not be negative"))]
    pub fasting_sugar: f64,

    #[serde(default)]
    pub post_meal_sugar: Option<f64>,

    #[serde(default)]
    pub profile: Option<MealLogProfile>,

    #[validate(length(min = 1, message = "at least one meal is required"), nested)]
    pub meals: Vec<MealEntryRequest>,
}

impl From<MealLogRequest> for MealLogInput {
    fn from(request: MealLogRequest) -> Self {
        Self {
            user_id: request.user_id,
            fasting_sugar: request.fasting_sugar,
            post_meal_sugar: request.post_meal_sugar,
            profile: request.profile,
            meals: request.meals.into_iter().map(MealEntryInput::from).collect(),
        }
    }
}
