use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, food::FoodCategory, portion::units::PortionUnit,
};

/// A user portion resolved to a canonical mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConvertedPortion {
    pub quantity: f64,
    pub unit: PortionUnit,
    pub grams: f64,
    /// False when the unit was not recognised and the default multiplier was used.
    pub unit_recognized: bool,
    /// True when the mass exceeds the plausibility limit. Flagged, never rejected.
    pub implausible: bool,
}

/// Reject non-positive or non-finite quantities.
pub fn validate_quantity(quantity: f64) -> Result<(), CoreError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidQuantity(format!(
            "quantity must be greater than zero, got {}",
            quantity
        )))
    }
}

/// Convert `quantity` of `unit` into grams for a food of the given category.
///
/// Unknown units fall back to 100 g per unit and log a warning; portions heavier
/// than `implausible_above_g` are flagged and logged.
pub fn convert_to_grams(
    quantity: f64,
    unit: &str,
    category: FoodCategory,
    implausible_above_g: f64,
) -> Result<ConvertedPortion, CoreError> {
    validate_quantity(quantity)?;

    let unit = PortionUnit::parse(unit);
    let unit_recognized = unit.is_recognized();
    if !unit_recognized {
        warn!(
            unit = %unit,
            category = %category,
            default_grams = unit.grams_per_unit(category),
            "unrecognized portion unit, using default multiplier"
        );
    }

    let grams = quantity * unit.grams_per_unit(category);
    let implausible = grams > implausible_above_g;
    if implausible {
        warn!(
            quantity,
            unit = %unit,
            grams,
            "implausible portion size"
        );
    }

    Ok(ConvertedPortion {
        quantity,
        unit,
        grams,
        unit_recognized,
        implausible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: f64 = 2000.0;

    #[test]
    fn unknown_unit_uses_default_and_is_flagged() {
        for category in [FoodCategory::Vegetables, FoodCategory::Desserts, FoodCategory::Grains] {
            let portion = convert_to_grams(1.0, "unknown_unit", category, LIMIT).unwrap();
            assert_eq!(portion.grams, 100.0);
            assert!(!portion.unit_recognized);
        }
    }

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        for quantity in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = convert_to_grams(quantity, "cup", FoodCategory::Grains, LIMIT).unwrap_err();
            assert!(matches!(err, CoreError::InvalidQuantity(_)));
        }
    }

    #[test]
    fn conversion_is_linear_in_quantity() {
        let units = ["cup", "bowl", "katori", "plate", "glass", "tbsp", "tsp", "slice", "g", "piece"];
        let categories = [FoodCategory::Bread, FoodCategory::Desserts, FoodCategory::Snacks, FoodCategory::Dairy];
        for unit in units {
            for category in categories {
                for quantity in [0.5, 1.0, 1.5, 3.0] {
                    let single = convert_to_grams(quantity, unit, category, LIMIT).unwrap();
                    let double = convert_to_grams(2.0 * quantity, unit, category, LIMIT).unwrap();
                    assert!((double.grams - 2.0 * single.grams).abs() < 1e-9, "{unit} {category}");
                }
            }
        }
    }

    #[test]
    fn household_units_match_table() {
        let cases = [
            ("cup", 200.0),
            ("bowl", 150.0),
            ("katori", 110.0),
            ("plate", 250.0),
            ("glass", 250.0),
            ("tbsp", 15.0),
            ("tsp", 5.0),
            ("slice", 30.0),
            ("ml", 1.0),
        ];
        for (unit, grams) in cases {
            let portion = convert_to_grams(1.0, unit, FoodCategory::Vegetables, LIMIT).unwrap();
            assert_eq!(portion.grams, grams, "{unit}");
            assert!(portion.unit_recognized);
        }
    }

    #[test]
    fn large_portions_are_flagged_not_rejected() {
        let portion = convert_to_grams(10.0, "plate", FoodCategory::Grains, LIMIT).unwrap();
        assert_eq!(portion.grams, 2500.0);
        assert!(portion.implausible);

        let portion = convert_to_grams(8.0, "plate", FoodCategory::Grains, LIMIT).unwrap();
        assert!(!portion.implausible);
    }
}
