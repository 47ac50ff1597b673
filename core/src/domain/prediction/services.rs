use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food::{categorize, ports::FoodCatalog},
    guardrail::{RiskVerdict, RuleContext},
    portion::{PortionFeatures, convert_to_grams, units::DEFAULT_GRAMS_PER_UNIT},
    prediction::{
        entities::{
            ClassifierPrediction, MealLogSummary, PredictionLogEntry, PredictionMode,
            PredictionResult, UserContext,
        },
        explanation::explain,
        features::FeatureVector,
        ports::{MealSafetyService, PredictionLog, RiskClassifier},
        value_objects::{MealLogInput, MealLogOutcome, PredictMealInput},
    },
};

impl<FC, RC, PL> Service<FC, RC, PL>
where
    FC: FoodCatalog,
    RC: RiskClassifier,
    PL: PredictionLog,
{
    /// Ask the classifier, turning any failure into `None` so the caller falls
    /// back to guardrails-only mode.
    async fn classify(
        &self,
        user: &UserContext,
        features: &PortionFeatures,
        food_name: &str,
        warnings: &mut Vec<String>,
    ) -> Option<ClassifierPrediction> {
        let classifier = self.risk_classifier.as_ref()?;

        match classifier
            .predict(FeatureVector::build(user, features))
            .await
        {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                warn!(food = %food_name, "risk classifier failed, using guardrails only: {}", e);
                warnings.push(format!("Risk model failed ({}), guardrails-only prediction", e));
                None
            }
        }
    }
}

impl<FC, RC, PL> MealSafetyService for Service<FC, RC, PL>
where
    FC: FoodCatalog,
    RC: RiskClassifier,
    PL: PredictionLog,
{
    async fn predict_meal(&self, input: PredictMealInput) -> Result<PredictionResult, CoreError> {
        // 1. Resolve the dish and its category
        let food = self.food_catalog.find(&input.food_name)?;
        let category = categorize(&food.name);

        // 2. Normalize the portion to grams
        let portion = convert_to_grams(
            input.quantity,
            &input.unit,
            category,
            self.engine.implausible_portion_g,
        )?;

        let mut warnings = Vec::new();
        if !portion.unit_recognized {
            warnings.push(format!(
                "Unrecognized unit '{}', assumed {}g per unit",
                portion.unit, DEFAULT_GRAMS_PER_UNIT
            ));
        }
        if portion.implausible {
            warnings.push(format!("Implausible portion size ({:.0}g)", portion.grams));
        }

        // 3. Portion-scaled features
        let features = PortionFeatures::compute(&food, portion.grams);

        // 4. General guardrails
        let ctx = RuleContext {
            food: &food,
            features: &features,
            category,
            user: Some(&input.user),
        };
        let mut outcome = self.guardrails.evaluate_context(&ctx);

        // 5. Classifier, unless the guardrails already ruled the meal unsafe
        let (classifier, mode) = if outcome.verdict == Some(RiskVerdict::Unsafe) {
            let mode = if self.risk_classifier.is_some() {
                PredictionMode::Combined
            } else {
                PredictionMode::GuardrailsOnly
            };
            (None, mode)
        } else {
            match self
                .classify(&input.user, &features, &food.name, &mut warnings)
                .await
            {
                Some(prediction) => (Some(prediction), PredictionMode::Combined),
                None => (None, PredictionMode::GuardrailsOnly),
            }
        };

        // 6. Category rules step in when nothing else can weigh the portion
        if mode == PredictionMode::GuardrailsOnly {
            outcome = outcome.merge(self.category_guardrails.evaluate_context(&ctx));
        }
        let guardrail_triggered = outcome.triggered();

        // 7. Fuse and explain
        let decision = self.engine.fusion.fuse(outcome.verdict, classifier.as_ref());
        let explanation = explain(
            &food,
            &features,
            &outcome.reasons,
            decision.verdict,
            classifier.as_ref(),
        );

        info!(
            food = %food.name,
            category = %category,
            grams = portion.grams,
            verdict = %decision.verdict,
            confidence = decision.confidence,
            guardrail_triggered,
            "meal prediction"
        );

        Ok(PredictionResult {
            food_name: food.name,
            category,
            portion,
            risk_level: decision.verdict,
            confidence: decision.confidence,
            explanation,
            reasons: outcome.reasons,
            portion_features: features,
            guardrail_triggered,
            model_prediction: classifier.map(|prediction| prediction.verdict()),
            model_confidence: classifier.map(|prediction| prediction.confidence),
            mode,
            bmi: input.user.bmi,
            warnings,
        })
    }

    async fn log_meals(&self, input: MealLogInput) -> Result<MealLogOutcome, CoreError> {
        if input.meals.is_empty() {
            return Err(CoreError::InvalidQuantity(
                "at least one meal is required".to_string(),
            ));
        }

        let profile = input.profile.unwrap_or_default();
        let mut predictions = Vec::with_capacity(input.meals.len());

        for meal in &input.meals {
            let user = UserContext {
                age: profile.age,
                gender: profile.gender,
                bmi: profile.bmi,
                fasting_sugar: input.fasting_sugar,
                post_meal_sugar: input.post_meal_sugar,
                meal_time: meal.meal_time,
            };

            let result = self
                .predict_meal(PredictMealInput {
                    food_name: meal.food_name.clone(),
                    quantity: meal.quantity,
                    unit: meal.unit.clone(),
                    user,
                })
                .await?;

            predictions.push(result);
        }

        let mut persisted = true;

        for (meal, result) in input.meals.iter().zip(&predictions) {
            let entry = PredictionLogEntry::new(
                input.user_id.clone(),
                result,
                meal.meal_time,
                input.fasting_sugar,
                input.post_meal_sugar,
            );

            if let Err(e) = self.prediction_log.record_prediction(entry).await {
                warn!(user_id = %input.user_id, food = %result.food_name, "failed to persist prediction: {}", e);
                persisted = false;
            }
        }

        let summary = MealLogSummary::new(
            input.user_id.clone(),
            &predictions,
            input.fasting_sugar,
            input.post_meal_sugar,
        );

        if let Err(e) = self.prediction_log.record_summary(summary.clone()).await {
            warn!(user_id = %input.user_id, "failed to persist meal log summary: {}", e);
            persisted = false;
        }

        info!(
            user_id = %input.user_id,
            meals = predictions.len(),
            overall_risk = %summary.overall_risk,
            persisted,
            "meal log recorded"
        );

        Ok(MealLogOutcome {
            summary,
            predictions,
            persisted,
        })
    }
}
