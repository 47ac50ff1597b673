use csv::StringRecord;
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::entities::{
        DEFAULT_GLYCEMIC_INDEX, DEFAULT_RISKY_THRESHOLD_SUGAR, DEFAULT_SAFE_THRESHOLD_SUGAR,
        DEFAULT_SERVING_SIZE_G, FoodRecord, parse_avoid_flag,
    },
};

/// Header positions of the nutrition table. Only the dish name is mandatory.
#[derive(Debug, Clone, Default)]
pub struct FoodColumns {
    dish_name: usize,
    serving_size_g: Option<usize>,
    carbs_g: Option<usize>,
    sugar_g: Option<usize>,
    protein_g: Option<usize>,
    fat_g: Option<usize>,
    fiber_g: Option<usize>,
    calories_kcal: Option<usize>,
    glycemic_index: Option<usize>,
    glycemic_load: Option<usize>,
    avoid_for_condition: Option<usize>,
    safe_threshold_sugar: Option<usize>,
    risky_threshold_sugar: Option<usize>,
}

impl FoodColumns {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, CoreError> {
        let position = |names: &[&str]| {
            headers
                .iter()
                .position(|header| names.iter().any(|name| header.trim().eq_ignore_ascii_case(name)))
        };

        let dish_name = position(&["dish_name", "name"]).ok_or_else(|| {
            CoreError::Dataset("nutrition table has no dish_name column".to_string())
        })?;

        Ok(Self {
            dish_name,
            serving_size_g: position(&["serving_size_g"]),
            carbs_g: position(&["carbs_g"]),
            sugar_g: position(&["sugar_g"]),
            protein_g: position(&["protein_g"]),
            fat_g: position(&["fat_g"]),
            fiber_g: position(&["fiber_g"]),
            calories_kcal: position(&["calories_kcal"]),
            glycemic_index: position(&["glycemic_index"]),
            glycemic_load: position(&["glycemic_load"]),
            avoid_for_condition: position(&["avoid_for_diabetic", "avoid_for_condition"]),
            safe_threshold_sugar: position(&["safe_threshold_sugar"]),
            risky_threshold_sugar: position(&["risky_threshold_sugar"]),
        })
    }
}

/// Map one CSV row to a record, substituting defaults for missing or broken
/// cells. Rows without a dish name yield `None`.
pub fn map_food_row(record: &StringRecord, columns: &FoodColumns) -> Option<FoodRecord> {
    let name = record.get(columns.dish_name).map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    let number = |column: Option<usize>, field: &str, default: f64| -> f64 {
        let cell = column
            .and_then(|index| record.get(index))
            .map(str::trim)
            .unwrap_or_default();

        if cell.is_empty() {
            return default;
        }

        match cell.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            _ => {
                warn!(food = %name, field, value = %cell, default, "malformed nutrition cell, using default");
                default
            }
        }
    };

    let mut serving_size_g = number(columns.serving_size_g, "serving_size_g", DEFAULT_SERVING_SIZE_G);
    if serving_size_g <= 0.0 {
        warn!(food = %name, "zero serving size, using {}g", DEFAULT_SERVING_SIZE_G);
        serving_size_g = DEFAULT_SERVING_SIZE_G;
    }

    let avoid_for_condition = columns
        .avoid_for_condition
        .and_then(|index| record.get(index))
        .map(parse_avoid_flag)
        .unwrap_or(false);

    Some(FoodRecord {
        name: name.to_string(),
        serving_size_g,
        carbs_g: number(columns.carbs_g, "carbs_g", 0.0),
        sugar_g: number(columns.sugar_g, "sugar_g", 0.0),
        protein_g: number(columns.protein_g, "protein_g", 0.0),
        fat_g: number(columns.fat_g, "fat_g", 0.0),
        fiber_g: number(columns.fiber_g, "fiber_g", 0.0),
        calories_kcal: number(columns.calories_kcal, "calories_kcal", 0.0),
        glycemic_index: number(columns.glycemic_index, "glycemic_index", DEFAULT_GLYCEMIC_INDEX),
        glycemic_load: number(columns.glycemic_load, "glycemic_load", 0.0),
        avoid_for_condition,
        safe_threshold_sugar: number(
            columns.safe_threshold_sugar,
            "safe_threshold_sugar",
            DEFAULT_SAFE_THRESHOLD_SUGAR,
        ),
        risky_threshold_sugar: number(
            columns.risky_threshold_sugar,
            "risky_threshold_sugar",
            DEFAULT_RISKY_THRESHOLD_SUGAR,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> StringRecord {
        StringRecord::from(vec![
            "dish_name",
            "serving_size_g",
            "carbs_g",
            "sugar_g",
            "glycemic_index",
            "avoid_for_diabetic",
        ])
    }

    #[test]
    fn maps_a_complete_row() {
        let columns = FoodColumns::from_headers(&headers()).unwrap();
        let row = StringRecord::from(vec!["Plain cream cake", "100", "20.5", "12", "60", "Yes"]);

        let food = map_food_row(&row, &columns).unwrap();

        assert_eq!(food.name, "Plain cream cake");
        assert_eq!(food.carbs_g, 20.5);
        assert_eq!(food.sugar_g, 12.0);
        assert!(food.avoid_for_condition);
        assert_eq!(food.safe_threshold_sugar, 110.0);
        assert_eq!(food.risky_threshold_sugar, 140.0);
    }

    #[test]
    fn broken_cells_fall_back_to_defaults() {
        let columns = FoodColumns::from_headers(&headers()).unwrap();
        let row = StringRecord::from(vec!["Mystery dish", "0", "n/a", "-3", "", "no"]);

        let food = map_food_row(&row, &columns).unwrap();

        assert_eq!(food.serving_size_g, 100.0);
        assert_eq!(food.carbs_g, 0.0);
        assert_eq!(food.sugar_g, 0.0);
        assert_eq!(food.glycemic_index, 50.0);
        assert!(!food.avoid_for_condition);
    }

    #[test]
    fn alias_column_and_missing_name() {
        let headers = StringRecord::from(vec!["dish_name", "avoid_for_condition"]);
        let columns = FoodColumns::from_headers(&headers).unwrap();

        let food = map_food_row(&StringRecord::from(vec!["Jalebi", "YES"]), &columns).unwrap();
        assert!(food.avoid_for_condition);

        assert!(map_food_row(&StringRecord::from(vec!["  ", "yes"]), &columns).is_none());
    }

    #[test]
    fn dish_name_column_is_required() {
        let headers = StringRecord::from(vec!["food", "carbs_g"]);

        assert!(matches!(
            FoodColumns::from_headers(&headers),
            Err(CoreError::Dataset(_))
        ));
    }
}
