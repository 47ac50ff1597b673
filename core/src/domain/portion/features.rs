use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food::FoodRecord;

/// Portion-scaled nutrition for one request. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PortionFeatures {
    pub portion_g: f64,
    pub portion_multiplier: f64,
    pub carbs_effective_g: f64,
    pub sugar_effective_g: f64,
    pub calories_effective_kcal: f64,
    /// Glycemic load of this portion; the authoritative value for every rule.
    #[serde(rename = "GL_portion")]
    pub gl_portion: f64,
    pub fiber_to_carb_ratio: f64,
    pub protein_to_carb_ratio: f64,
    pub energy_density: f64,
    pub glycemic_index: f64,
}

impl PortionFeatures {
    /// Scale a food's per-serving values to `mass_g`.
    ///
    /// Effective values grow linearly with the multiplier; the ratios and the
    /// energy density describe the food itself and ignore the portion.
    pub fn compute(food: &FoodRecord, mass_g: f64) -> Self {
        let serving_size_g = food.effective_serving_size_g();
        let portion_multiplier = mass_g / serving_size_g;

        let carbs_effective_g = food.carbs_g * portion_multiplier;
        let sugar_effective_g = food.sugar_g * portion_multiplier;
        let calories_effective_kcal = food.calories_kcal * portion_multiplier;
        let gl_portion = carbs_effective_g * food.glycemic_index / 100.0;

        // floored at 1 g so carb-free foods get a large, finite ratio
        let carb_denominator = food.carbs_g.max(1.0);

        Self {
            portion_g: mass_g,
            portion_multiplier,
            carbs_effective_g,
            sugar_effective_g,
            calories_effective_kcal,
            gl_portion,
            fiber_to_carb_ratio: food.fiber_g / carb_denominator,
            protein_to_carb_ratio: food.protein_g / carb_denominator,
            energy_density: food.calories_kcal / serving_size_g,
            glycemic_index: food.glycemic_index,
        }
    }
}
