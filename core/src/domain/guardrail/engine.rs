use tracing::debug;

use crate::domain::{
    food::{FoodRecord, categorize},
    guardrail::{
        category_rules::category_aware_rules,
        rules::{GuardrailRule, RuleContext, RuleFinding, standard_rules},
        verdict::RiskVerdict,
    },
    portion::PortionFeatures,
    prediction::entities::UserContext,
};

/// Folded result of a rule set: `None` means no rule fired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuardrailOutcome {
    pub verdict: Option<RiskVerdict>,
    pub reasons: Vec<String>,
}

impl GuardrailOutcome {
    pub fn triggered(&self) -> bool {
        self.verdict.is_some()
    }

    /// Fold one finding in. Severity only ever goes up; the reason is always kept.
    pub fn apply(&mut self, finding: RuleFinding) {
        self.verdict = Some(RiskVerdict::escalate(self.verdict, finding.verdict));
        self.reasons.push(finding.reason);
    }

    /// Combine two outcomes escalate-only, keeping `self`'s reasons first.
    pub fn merge(mut self, other: GuardrailOutcome) -> GuardrailOutcome {
        if let Some(verdict) = other.verdict {
            self.verdict = Some(RiskVerdict::escalate(self.verdict, verdict));
        }
        self.reasons.extend(other.reasons);
        self
    }
}

/// An ordered list of independent rules evaluated against one portion.
pub struct GuardrailEngine {
    rules: Vec<Box<dyn GuardrailRule>>,
}

impl GuardrailEngine {
    pub fn new(rules: Vec<Box<dyn GuardrailRule>>) -> Self {
        Self { rules }
    }

    /// Avoid flag, portion sanity, sugar load, glycemic load, calories.
    pub fn standard() -> Self {
        Self::new(standard_rules())
    }

    /// Category judgement followed by the extreme-load override. Used when no
    /// classifier can weigh in.
    pub fn category_aware() -> Self {
        Self::new(category_aware_rules())
    }

    pub fn evaluate(
        &self,
        food: &FoodRecord,
        features: &PortionFeatures,
        user: Option<&UserContext>,
    ) -> GuardrailOutcome {
        let ctx = RuleContext {
            food,
            features,
            category: categorize(&food.name),
            user,
        };
        self.evaluate_context(&ctx)
    }

    pub fn evaluate_context(&self, ctx: &RuleContext<'_>) -> GuardrailOutcome {
        let mut outcome = GuardrailOutcome::default();

        for rule in &self.rules {
            if let Some(finding) = rule.evaluate(ctx) {
                debug!(
                    rule = finding.rule,
                    verdict = %finding.verdict,
                    food = %ctx.food.name,
                    "guardrail fired"
                );
                outcome.apply(finding);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cream_cake() -> FoodRecord {
        FoodRecord {
            sugar_g: 12.0,
            carbs_g: 20.0,
            calories_kcal: 150.0,
            glycemic_index: 60.0,
            avoid_for_condition: true,
            ..FoodRecord::with_defaults("Plain cream cake")
        }
    }

    fn mixed_dal() -> FoodRecord {
        FoodRecord {
            sugar_g: 1.0,
            carbs_g: 12.0,
            protein_g: 8.0,
            fiber_g: 4.0,
            calories_kcal: 110.0,
            glycemic_index: 35.0,
            ..FoodRecord::with_defaults("Mixed dal")
        }
    }

    #[test]
    fn one_slice_of_cake_defers() {
        let food = cream_cake();
        let features = PortionFeatures::compute(&food, 30.0);

        let outcome = GuardrailEngine::standard().evaluate(&food, &features, None);

        assert_eq!(outcome.verdict, None);
        assert!(outcome.reasons.is_empty());
        assert!(!outcome.triggered());
    }

    #[test]
    fn ten_slices_of_cake_is_unsafe_with_every_reason() {
        let food = cream_cake();
        let features = PortionFeatures::compute(&food, 300.0);

        let outcome = GuardrailEngine::standard().evaluate(&food, &features, None);

        assert_eq!(outcome.verdict, Some(RiskVerdict::Unsafe));
        assert!(outcome.reasons.iter().any(|r| r.contains("sugar load")));
        assert!(outcome.reasons.iter().any(|r| r.contains("Very large portion")));
    }

    #[test]
    fn two_katori_of_dal_trip_nothing() {
        let food = mixed_dal();
        let features = PortionFeatures::compute(&food, 220.0);

        let outcome = GuardrailEngine::standard().evaluate(&food, &features, None);

        assert_eq!(outcome.verdict, None);
    }

    #[test]
    fn two_bowls_of_dal_only_hit_the_portion_band() {
        // 300 g is exactly 3x, the start of the very-large band
        let food = mixed_dal();
        let features = PortionFeatures::compute(&food, 300.0);

        let outcome = GuardrailEngine::standard().evaluate(&food, &features, None);

        assert_eq!(outcome.verdict, Some(RiskVerdict::Caution));
        assert_eq!(outcome.reasons.len(), 1);
        assert!(outcome.reasons[0].starts_with("Very large portion size"));
    }

    #[test]
    fn later_caution_never_downgrades_earlier_unsafe() {
        // portion sanity goes unsafe at 5x; calories then land in the caution band
        let food = FoodRecord {
            calories_kcal: 150.0,
            ..FoodRecord::with_defaults("Cucumber salad")
        };
        let features = PortionFeatures::compute(&food, 500.0);

        let outcome = GuardrailEngine::standard().evaluate(&food, &features, None);

        assert_eq!(outcome.verdict, Some(RiskVerdict::Unsafe));
        assert_eq!(outcome.reasons.len(), 2);
        assert!(outcome.reasons[1].contains("calorie"));
    }

    #[test]
    fn verdict_never_decreases_as_portion_grows() {
        let foods = [
            cream_cake(),
            mixed_dal(),
            FoodRecord {
                carbs_g: 45.0,
                sugar_g: 0.5,
                calories_kcal: 200.0,
                glycemic_index: 73.0,
                ..FoodRecord::with_defaults("Steamed rice")
            },
            FoodRecord {
                carbs_g: 30.0,
                sugar_g: 22.0,
                calories_kcal: 350.0,
                glycemic_index: 70.0,
                avoid_for_condition: true,
                ..FoodRecord::with_defaults("Gulab jamun")
            },
        ];
        let engine = GuardrailEngine::standard();

        for food in &foods {
            let mut previous: Option<RiskVerdict> = None;
            for step in 1..=80 {
                let grams = step as f64 * 10.0;
                let features = PortionFeatures::compute(food, grams);
                let verdict = engine.evaluate(food, &features, None).verdict;
                assert!(
                    verdict >= previous,
                    "{} regressed from {:?} to {:?} at {}g",
                    food.name,
                    previous,
                    verdict,
                    grams
                );
                previous = verdict;
            }
        }
    }

    #[test]
    fn merge_escalates_and_concatenates() {
        let general = GuardrailOutcome {
            verdict: Some(RiskVerdict::Caution),
            reasons: vec!["general".to_string()],
        };
        let category = GuardrailOutcome {
            verdict: Some(RiskVerdict::Safe),
            reasons: vec!["category".to_string()],
        };

        let merged = general.merge(category);

        assert_eq!(merged.verdict, Some(RiskVerdict::Caution));
        assert_eq!(merged.reasons, vec!["general", "category"]);

        let merged = GuardrailOutcome::default().merge(GuardrailOutcome {
            verdict: Some(RiskVerdict::Safe),
            reasons: vec![],
        });
        assert_eq!(merged.verdict, Some(RiskVerdict::Safe));
    }
}
