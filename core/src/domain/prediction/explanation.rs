use crate::domain::{
    food::FoodRecord,
    guardrail::RiskVerdict,
    portion::PortionFeatures,
    prediction::entities::ClassifierPrediction,
};

/// Render the final verdict as one sentence. Purely presentational.
///
/// The model note is only included when no guardrail gave a reason.
pub fn explain(
    food: &FoodRecord,
    features: &PortionFeatures,
    reasons: &[String],
    verdict: RiskVerdict,
    classifier: Option<&ClassifierPrediction>,
) -> String {
    let multiplier = features.portion_multiplier;
    let mut parts = Vec::with_capacity(reasons.len() + 3);

    if multiplier > 1.5 {
        parts.push(format!("Large portion ({:.1}× normal)", multiplier));
    } else if multiplier < 0.5 {
        parts.push(format!("Small portion ({:.1}× normal)", multiplier));
    } else {
        parts.push(format!("Normal portion ({:.1}×)", multiplier));
    }

    parts.push(format!("GL={:.1}", features.gl_portion));
    if features.sugar_effective_g > 5.0 {
        parts.push(format!("sugar={:.0}g", features.sugar_effective_g));
    }

    parts.extend(reasons.iter().cloned());

    if reasons.is_empty() {
        match classifier {
            Some(prediction) => parts.push(format!(
                "Model: {} ({:.1}%)",
                prediction.verdict(),
                prediction.confidence * 100.0
            )),
            None => parts.push("Risk model unavailable".to_string()),
        }
    }

    format!(
        "{}: {} → marked {}.",
        food.name,
        parts.join(", "),
        verdict.as_str().to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cake() -> FoodRecord {
        FoodRecord {
            carbs_g: 20.0,
            sugar_g: 12.0,
            glycemic_index: 60.0,
            ..FoodRecord::with_defaults("Plain cream cake")
        }
    }

    #[test]
    fn small_portion_mentions_model() {
        let food = cake();
        let features = PortionFeatures::compute(&food, 30.0);
        let model = ClassifierPrediction {
            label: 1,
            confidence: 0.93,
        };

        let text = explain(&food, &features, &[], RiskVerdict::Safe, Some(&model));

        assert_eq!(
            text,
            "Plain cream cake: Small portion (0.3× normal), GL=3.6, Model: safe (93.0%) → marked SAFE."
        );
    }

    #[test]
    fn reasons_replace_the_model_note() {
        let food = cake();
        let features = PortionFeatures::compute(&food, 300.0);
        let reasons = vec![
            "High sugar load (36.0g, 30-39g range)".to_string(),
            "Very large portion (3.0×) with high GL/sugar".to_string(),
        ];
        let model = ClassifierPrediction {
            label: 1,
            confidence: 0.99,
        };

        let text = explain(&food, &features, &reasons, RiskVerdict::Unsafe, Some(&model));

        assert!(text.starts_with("Plain cream cake: Large portion (3.0× normal), GL=36.0, sugar=36g, High sugar load"));
        assert!(!text.contains("Model:"));
        assert!(text.ends_with("→ marked UNSAFE."));
    }

    #[test]
    fn missing_model_is_stated() {
        let food = FoodRecord::with_defaults("Cucumber salad");
        let features = PortionFeatures::compute(&food, 100.0);

        let text = explain(&food, &features, &[], RiskVerdict::Caution, None);

        assert_eq!(
            text,
            "Cucumber salad: Normal portion (1.0×), GL=0.0, Risk model unavailable → marked CAUTION."
        );
    }
}
