use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{common::entities::app_errors::CoreError, food::FoodCategory};

/// Multiplier applied to units nobody recognises.
pub const DEFAULT_GRAMS_PER_UNIT: f64 = 100.0;

const GRAMS_PER_CUP: f64 = 200.0;
const GRAMS_PER_SMALL_CUP: f64 = 150.0;
const GRAMS_PER_GLASS: f64 = 250.0;
const GRAMS_PER_BOWL: f64 = 150.0;
const GRAMS_PER_KATORI: f64 = 110.0;
const GRAMS_PER_PLATE: f64 = 250.0;
const GRAMS_PER_SMALL_PLATE: f64 = 150.0;
const GRAMS_PER_TBSP: f64 = 15.0;
const GRAMS_PER_TSP: f64 = 5.0;
const GRAMS_PER_SLICE: f64 = 30.0;

const GRAMS_PER_BREAD_PIECE: f64 = 30.0;
const GRAMS_PER_DESSERT_PIECE: f64 = 50.0;
const GRAMS_PER_SNACK_PIECE: f64 = 40.0;
const GRAMS_PER_GENERIC_PIECE: f64 = 50.0;

/// Household serving units understood by the converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PortionUnit {
    Gram,
    Kilogram,
    Millilitre,
    Litre,
    Cup,
    SmallCup,
    Glass,
    Bowl,
    Katori,
    Plate,
    SmallPlate,
    Tablespoon,
    Teaspoon,
    Slice,
    Piece,
    Unknown(String),
}

impl PortionUnit {
    /// Parse free-text unit names. Never fails: anything unrecognised becomes
    /// [`PortionUnit::Unknown`] holding the normalised text.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw
            .trim()
            .to_lowercase()
            .replace([' ', '-'], "_")
            .trim_end_matches('.')
            .to_string();

        match normalized.as_str() {
            "g" | "gm" | "gms" | "gram" | "grams" | "gramme" | "grammes" => PortionUnit::Gram,
            "kg" | "kgs" | "kilogram" | "kilograms" => PortionUnit::Kilogram,
            "ml" | "millilitre" | "millilitres" | "milliliter" | "milliliters" => {
                PortionUnit::Millilitre
            }
            "l" | "litre" | "litres" | "liter" | "liters" => PortionUnit::Litre,
            "cup" | "cups" => PortionUnit::Cup,
            "small_cup" | "small_cups" => PortionUnit::SmallCup,
            "glass" | "glasses" => PortionUnit::Glass,
            "bowl" | "bowls" => PortionUnit::Bowl,
            "katori" | "katoris" => PortionUnit::Katori,
            "plate" | "plates" => PortionUnit::Plate,
            "small_plate" | "small_plates" => PortionUnit::SmallPlate,
            "tbsp" | "tbsps" | "tablespoon" | "tablespoons" => PortionUnit::Tablespoon,
            "tsp" | "tsps" | "teaspoon" | "teaspoons" => PortionUnit::Teaspoon,
            "slice" | "slices" => PortionUnit::Slice,
            "piece" | "pieces" | "pc" | "pcs" => PortionUnit::Piece,
            _ => PortionUnit::Unknown(normalized),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, PortionUnit::Unknown(_))
    }

    /// Grams per one unit. Only `Piece` depends on the food category.
    pub fn grams_per_unit(&self, category: FoodCategory) -> f64 {
        match self {
            PortionUnit::Gram | PortionUnit::Millilitre => 1.0,
            PortionUnit::Kilogram | PortionUnit::Litre => 1000.0,
            PortionUnit::Cup => GRAMS_PER_CUP,
            PortionUnit::SmallCup => GRAMS_PER_SMALL_CUP,
            PortionUnit::Glass => GRAMS_PER_GLASS,
            PortionUnit::Bowl => GRAMS_PER_BOWL,
            PortionUnit::Katori => GRAMS_PER_KATORI,
            PortionUnit::Plate => GRAMS_PER_PLATE,
            PortionUnit::SmallPlate => GRAMS_PER_SMALL_PLATE,
            PortionUnit::Tablespoon => GRAMS_PER_TBSP,
            PortionUnit::Teaspoon => GRAMS_PER_TSP,
            PortionUnit::Slice => GRAMS_PER_SLICE,
            PortionUnit::Piece => match category {
                FoodCategory::Bread => GRAMS_PER_BREAD_PIECE,
                FoodCategory::Desserts => GRAMS_PER_DESSERT_PIECE,
                FoodCategory::Snacks => GRAMS_PER_SNACK_PIECE,
                _ => GRAMS_PER_GENERIC_PIECE,
            },
            PortionUnit::Unknown(_) => DEFAULT_GRAMS_PER_UNIT,
        }
    }
}

impl FromStr for PortionUnit {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PortionUnit::parse(s))
    }
}

impl fmt::Display for PortionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PortionUnit::Gram => "g",
            PortionUnit::Kilogram => "kg",
            PortionUnit::Millilitre => "ml",
            PortionUnit::Litre => "l",
            PortionUnit::Cup => "cup",
            PortionUnit::SmallCup => "small_cup",
            PortionUnit::Glass => "glass",
            PortionUnit::Bowl => "bowl",
            PortionUnit::Katori => "katori",
            PortionUnit::Plate => "plate",
            PortionUnit::SmallPlate => "small_plate",
            PortionUnit::Tablespoon => "tbsp",
            PortionUnit::Teaspoon => "tsp",
            PortionUnit::Slice => "slice",
            PortionUnit::Piece => "piece",
            PortionUnit::Unknown(raw) => raw.as_str(),
        };
        f.write_str(name)
    }
}

static PORTION_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<quantity>\d+(?:\.\d+)?|\.\d+)\s*(?P<unit>[A-Za-z][A-Za-z _\-.]*)?\s*$")
        .expect("portion pattern is valid")
});

/// Split text such as `"1.5 cups"` or `"200g"` into a quantity and a unit.
/// A bare number is read as grams.
pub fn parse_portion(text: &str) -> Result<(f64, PortionUnit), CoreError> {
    let captures = PORTION_TEXT
        .captures(text)
        .ok_or_else(|| CoreError::InvalidQuantity(format!("cannot read portion '{}'", text)))?;

    let quantity: f64 = captures["quantity"]
        .parse()
        .map_err(|_| CoreError::InvalidQuantity(format!("cannot read portion '{}'", text)))?;

    let unit = captures
        .name("unit")
        .map(|m| PortionUnit::parse(m.as_str()))
        .unwrap_or(PortionUnit::Gram);

    Ok((quantity, unit))
}
