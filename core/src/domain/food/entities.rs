use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food::category::FoodCategory;

pub const DEFAULT_SERVING_SIZE_G: f64 = 100.0;
pub const DEFAULT_GLYCEMIC_INDEX: f64 = 50.0;
pub const DEFAULT_SAFE_THRESHOLD_SUGAR: f64 = 110.0;
pub const DEFAULT_RISKY_THRESHOLD_SUGAR: f64 = 140.0;

/// One row of the reference nutrition table. Nutrient values are per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodRecord {
    pub name: String,
    pub serving_size_g: f64,
    pub carbs_g: f64,
    pub sugar_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub calories_kcal: f64,
    pub glycemic_index: f64,
    /// Stored per-serving glycemic load. Informational only, guardrails use the
    /// portion-recomputed value.
    pub glycemic_load: f64,
    pub avoid_for_condition: bool,
    pub safe_threshold_sugar: f64,
    pub risky_threshold_sugar: f64,
}

impl FoodRecord {
    /// A record with every nutrient at its documented default.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serving_size_g: DEFAULT_SERVING_SIZE_G,
            carbs_g: 0.0,
            sugar_g: 0.0,
            protein_g: 0.0,
            fat_g: 0.0,
            fiber_g: 0.0,
            calories_kcal: 0.0,
            glycemic_index: DEFAULT_GLYCEMIC_INDEX,
            glycemic_load: 0.0,
            avoid_for_condition: false,
            safe_threshold_sugar: DEFAULT_SAFE_THRESHOLD_SUGAR,
            risky_threshold_sugar: DEFAULT_RISKY_THRESHOLD_SUGAR,
        }
    }

    /// Serving size usable as a divisor; zero, negative or non-finite sizes fall back to 100 g.
    pub fn effective_serving_size_g(&self) -> f64 {
        if self.serving_size_g.is_finite() && self.serving_size_g > 0.0 {
            self.serving_size_g
        } else {
            DEFAULT_SERVING_SIZE_G
        }
    }
}

/// Per-serving nutrition plus the category the engine files the dish under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodDetails {
    pub food: FoodRecord,
    pub category: FoodCategory,
}

/// Dataset flag parsing: only a case-insensitive "yes" marks the food.
pub fn parse_avoid_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avoid_flag_is_case_insensitive_yes() {
        assert!(parse_avoid_flag("Yes"));
        assert!(parse_avoid_flag(" YES "));
        assert!(!parse_avoid_flag("No"));
        assert!(!parse_avoid_flag("true"));
        assert!(!parse_avoid_flag(""));
    }

    #[test]
    fn zero_serving_size_falls_back_to_default() {
        let mut food = FoodRecord::with_defaults("Mystery dish");
        food.serving_size_g = 0.0;
        assert_eq!(food.effective_serving_size_g(), 100.0);

        food.serving_size_g = f64::NAN;
        assert_eq!(food.effective_serving_size_g(), 100.0);

        food.serving_size_g = 250.0;
        assert_eq!(food.effective_serving_size_g(), 250.0);
    }
}
