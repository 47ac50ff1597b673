use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp, generate_uuid_v7},
    food::FoodCategory,
    guardrail::RiskVerdict,
    portion::{ConvertedPortion, PortionFeatures},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// Model encoding: male is 1, everything else 0.
    pub fn encode(&self) -> f64 {
        match self {
            Gender::Male => 1.0,
            Gender::Female | Gender::Other => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum MealTime {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealTime {
    pub fn encode(&self) -> f64 {
        match self {
            MealTime::Breakfast => 0.0,
            MealTime::Lunch => 1.0,
            MealTime::Dinner => 2.0,
            MealTime::Snack => 3.0,
        }
    }

    /// Case-insensitive; anything unknown is treated as breakfast.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lunch" => MealTime::Lunch,
            "dinner" => MealTime::Dinner,
            "snack" | "snacks" => MealTime::Snack,
            _ => MealTime::Breakfast,
        }
    }
}

impl FromStr for MealTime {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MealTime::parse_lenient(s))
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealTime::Breakfast => "Breakfast",
            MealTime::Lunch => "Lunch",
            MealTime::Dinner => "Dinner",
            MealTime::Snack => "Snack",
        };
        f.write_str(name)
    }
}

/// Per-request information about the person eating. Read-only for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserContext {
    pub age: f64,
    pub gender: Gender,
    pub bmi: f64,
    pub fasting_sugar: f64,
    pub post_meal_sugar: Option<f64>,
    pub meal_time: MealTime,
}

/// Body-mass index from weight in kilograms and height in centimetres, rounded
/// to one decimal.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<f64, CoreError> {
    if !(weight_kg.is_finite() && weight_kg > 0.0 && height_cm.is_finite() && height_cm > 0.0) {
        return Err(CoreError::InvalidQuantity(format!(
            "weight and height must be positive, got {} kg and {} cm",
            weight_kg, height_cm
        )));
    }

    let height_m = height_cm / 100.0;
    let bmi = (weight_kg / (height_m * height_m) * 10.0).round() / 10.0;

    if bmi.is_finite() && bmi > 0.0 {
        Ok(bmi)
    } else {
        Err(CoreError::InvalidQuantity(format!(
            "computed BMI {} is not positive",
            bmi
        )))
    }
}

/// Use the BMI the caller gave, or derive it from weight and height.
pub fn resolve_bmi(
    bmi: Option<f64>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
) -> Result<f64, CoreError> {
    match (bmi, weight_kg, height_cm) {
        (Some(bmi), _, _) if bmi.is_finite() && bmi > 0.0 => Ok(bmi),
        (Some(bmi), _, _) => Err(CoreError::InvalidQuantity(format!(
            "BMI must be positive, got {}",
            bmi
        ))),
        (None, Some(weight_kg), Some(height_cm)) => compute_bmi(weight_kg, height_cm),
        _ => Err(CoreError::InvalidQuantity(
            "either bmi or both weight_kg and height_cm are required".to_string(),
        )),
    }
}

/// Binary classifier answer: label 1 is the safe class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassifierPrediction {
    pub label: u8,
    pub confidence: f64,
}

impl ClassifierPrediction {
    pub fn verdict(&self) -> RiskVerdict {
        if self.label == 1 {
            RiskVerdict::Safe
        } else {
            RiskVerdict::Caution
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMode {
    /// Guardrails fused with the classifier.
    Combined,
    /// No classifier answer; general and category guardrails decided alone.
    GuardrailsOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResult {
    pub food_name: String,
    pub category: FoodCategory,
    pub portion: ConvertedPortion,
    pub risk_level: RiskVerdict,
    pub confidence: f64,
    pub explanation: String,
    pub reasons: Vec<String>,
    pub portion_features: PortionFeatures,
    pub guardrail_triggered: bool,
    pub model_prediction: Option<RiskVerdict>,
    pub model_confidence: Option<f64>,
    pub mode: PredictionMode,
    pub bmi: f64,
    /// Data-quality notes such as an unrecognised unit. Never affect the verdict.
    pub warnings: Vec<String>,
}

/// One persisted prediction from a meal log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionLogEntry {
    pub id: Uuid,
    pub user_id: String,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub grams: f64,
    pub meal_time: MealTime,
    pub fasting_sugar: f64,
    pub post_meal_sugar: Option<f64>,
    pub risk_level: RiskVerdict,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PredictionLogEntry {
    pub fn new(
        user_id: String,
        result: &PredictionResult,
        meal_time: MealTime,
        fasting_sugar: f64,
        post_meal_sugar: Option<f64>,
    ) -> Self {
        let (now, _) = generate_timestamp();

        Self {
            id: generate_uuid_v7(),
            user_id,
            food_name: result.food_name.clone(),
            quantity: result.portion.quantity,
            unit: result.portion.unit.to_string(),
            grams: result.portion.grams,
            meal_time,
            fasting_sugar,
            post_meal_sugar,
            risk_level: result.risk_level,
            confidence: result.confidence,
            reasons: result.reasons.clone(),
            created_at: now,
        }
    }
}

/// Verdict for one meal of a log, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealRisk {
    pub food_name: String,
    pub risk_level: RiskVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealLogSummary {
    pub id: Uuid,
    pub user_id: String,
    pub meals_count: usize,
    pub meals: Vec<MealRisk>,
    /// Most severe verdict across the logged meals.
    pub overall_risk: RiskVerdict,
    pub fasting_sugar: f64,
    pub post_meal_sugar: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl MealLogSummary {
    pub fn new(
        user_id: String,
        results: &[PredictionResult],
        fasting_sugar: f64,
        post_meal_sugar: Option<f64>,
    ) -> Self {
        let (now, _) = generate_timestamp();
        let overall_risk = results
            .iter()
            .map(|result| result.risk_level)
            .max()
            .unwrap_or(RiskVerdict::Safe);

        Self {
            id: generate_uuid_v7(),
            user_id,
            meals_count: results.len(),
            meals: results
                .iter()
                .map(|result| MealRisk {
                    food_name: result.food_name.clone(),
                    risk_level: result.risk_level,
                })
                .collect(),
            overall_risk,
            fasting_sugar,
            post_meal_sugar,
            created_at: now,
        }
    }
}
