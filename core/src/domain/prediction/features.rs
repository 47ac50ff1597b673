use serde::{Deserialize, Serialize};

use crate::domain::{portion::PortionFeatures, prediction::entities::UserContext};

pub const FEATURE_COUNT: usize = 13;

/// Column order the risk model was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "bmi",
    "fasting_sugar",
    "time_of_day",
    "portion_multiplier",
    "carbs_effective_g",
    "sugar_effective_g",
    "GL_portion",
    "fiber_to_carb_ratio",
    "protein_to_carb_ratio",
    "energy_density",
    "glycemic_index",
];

/// Model input: user demographics followed by portion features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn build(user: &UserContext, features: &PortionFeatures) -> Self {
        Self([
            user.age,
            user.gender.encode(),
            user.bmi,
            user.fasting_sugar,
            user.meal_time.encode(),
            features.portion_multiplier,
            features.carbs_effective_g,
            features.sugar_effective_g,
            features.gl_portion,
            features.fiber_to_carb_ratio,
            features.protein_to_carb_ratio,
            features.energy_density,
            features.glycemic_index,
        ])
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        food::FoodRecord,
        prediction::entities::{Gender, MealTime},
    };

    #[test]
    fn vector_keeps_training_order() {
        let user = UserContext {
            age: 52.0,
            gender: Gender::Female,
            bmi: 27.5,
            fasting_sugar: 118.0,
            post_meal_sugar: Some(160.0),
            meal_time: MealTime::Dinner,
        };
        let food = FoodRecord {
            carbs_g: 20.0,
            sugar_g: 4.0,
            protein_g: 6.0,
            fiber_g: 5.0,
            calories_kcal: 150.0,
            glycemic_index: 40.0,
            ..FoodRecord::with_defaults("Vegetable pulao")
        };
        let features = PortionFeatures::compute(&food, 200.0);

        let vector = FeatureVector::build(&user, &features);

        assert_eq!(
            vector.values(),
            &[52.0, 0.0, 27.5, 118.0, 2.0, 2.0, 40.0, 8.0, 16.0, 0.25, 0.3, 1.5, 40.0]
        );
        assert_eq!(FEATURE_NAMES[8], "GL_portion");
    }
}
