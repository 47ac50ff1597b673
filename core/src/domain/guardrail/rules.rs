use crate::domain::{
    food::{FoodCategory, FoodRecord},
    guardrail::verdict::RiskVerdict,
    portion::PortionFeatures,
    prediction::entities::UserContext,
};

/// Everything a rule may inspect for one request.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub food: &'a FoodRecord,
    pub features: &'a PortionFeatures,
    pub category: FoodCategory,
    pub user: Option<&'a UserContext>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleFinding {
    pub rule: &'static str,
    pub verdict: RiskVerdict,
    pub reason: String,
}

impl RuleFinding {
    fn new(rule: &'static str, verdict: RiskVerdict, reason: String) -> Self {
        Self {
            rule,
            verdict,
            reason,
        }
    }
}

/// A single deterministic safety check. Returning `None` means the rule has
/// nothing to say about this portion.
pub trait GuardrailRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding>;
}

/// Reinterprets the dataset's avoid-for-diabetes flag against the actual portion.
pub struct AvoidFlagRule;

impl GuardrailRule for AvoidFlagRule {
    fn name(&self) -> &'static str {
        "avoid_flag"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding> {
        if !ctx.food.avoid_for_condition {
            return None;
        }

        let multiplier = ctx.features.portion_multiplier;
        let gl = ctx.features.gl_portion;
        let sugar = ctx.features.sugar_effective_g;
        let finding = |verdict, reason| Some(RuleFinding::new(self.name(), verdict, reason));

        if gl <= 8.0 && sugar <= 10.0 && multiplier <= 3.0 {
            // low-impact portion: the flag is a false positive, defer to the classifier
            None
        } else if sugar >= 25.0 && gl >= 15.0 {
            if multiplier >= 1.0 {
                finding(
                    RiskVerdict::Unsafe,
                    format!(
                        "Avoid-for-diabetes food with high sugar ({:.1}g) and GL ({:.1})",
                        sugar, gl
                    ),
                )
            } else {
                finding(
                    RiskVerdict::Caution,
                    format!(
                        "Avoid-for-diabetes food with high sugar and GL, small portion ({:.1}×)",
                        multiplier
                    ),
                )
            }
        } else if gl <= 15.0 && sugar <= 20.0 {
            if multiplier >= 4.0 {
                finding(
                    RiskVerdict::Unsafe,
                    format!(
                        "Excessive portion ({:.1}×) of avoid-for-diabetes food",
                        multiplier
                    ),
                )
            } else if multiplier >= 3.0 {
                finding(
                    RiskVerdict::Caution,
                    format!("Large portion ({:.1}×) of avoid-for-diabetes food", multiplier),
                )
            } else {
                None
            }
        } else if multiplier >= 2.0 {
            finding(
                RiskVerdict::Unsafe,
                format!(
                    "Avoid-for-diabetes food with moderate GL/sugar at large portion ({:.1}×)",
                    multiplier
                ),
            )
        } else if multiplier >= 1.5 {
            finding(
                RiskVerdict::Caution,
                format!(
                    "Avoid-for-diabetes food at elevated portion ({:.1}×)",
                    multiplier
                ),
            )
        } else {
            None
        }
    }
}

/// Flags portions that are several servings large.
pub struct PortionSanityRule;

impl GuardrailRule for PortionSanityRule {
    fn name(&self) -> &'static str {
        "portion_sanity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding> {
        let multiplier = ctx.features.portion_multiplier;
        let gl = ctx.features.gl_portion;
        let sugar = ctx.features.sugar_effective_g;

        let (verdict, reason) = if multiplier >= 5.0 {
            (
                RiskVerdict::Unsafe,
                format!("Extreme portion size ({:.1}× ≥5.0)", multiplier),
            )
        } else if multiplier >= 3.0 {
            if gl >= 15.0 || sugar >= 20.0 {
                (
                    RiskVerdict::Unsafe,
                    format!("Very large portion ({:.1}×) with high GL/sugar", multiplier),
                )
            } else {
                (
                    RiskVerdict::Caution,
                    format!("Very large portion size ({:.1}×)", multiplier),
                )
            }
        } else if multiplier >= 2.0 && (gl >= 12.0 || sugar >= 15.0) {
            (
                RiskVerdict::Caution,
                format!("Large portion ({:.1}×) with moderate GL/sugar", multiplier),
            )
        } else {
            return None;
        };

        Some(RuleFinding::new(self.name(), verdict, reason))
    }
}

/// Absolute sugar mass in the portion.
pub struct SugarLoadRule;

impl GuardrailRule for SugarLoadRule {
    fn name(&self) -> &'static str {
        "sugar_load"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding> {
        let sugar = ctx.features.sugar_effective_g;

        if sugar >= 40.0 {
            Some(RuleFinding::new(
                self.name(),
                RiskVerdict::Unsafe,
                format!("Very high sugar load ({:.1}g ≥40g)", sugar),
            ))
        } else if sugar >= 30.0 {
            Some(RuleFinding::new(
                self.name(),
                RiskVerdict::Caution,
                format!("High sugar load ({:.1}g, 30-39g range)", sugar),
            ))
        } else {
            None
        }
    }
}

/// Glycemic load of the portion.
pub struct GlycemicLoadRule;

impl GuardrailRule for GlycemicLoadRule {
    fn name(&self) -> &'static str {
        "glycemic_load"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding> {
        let gl = ctx.features.gl_portion;

        if gl >= 25.0 {
            Some(RuleFinding::new(
                self.name(),
                RiskVerdict::Unsafe,
                format!("Very high glycemic load ({:.1} ≥25)", gl),
            ))
        } else if gl >= 15.0 {
            Some(RuleFinding::new(
                self.name(),
                RiskVerdict::Caution,
                format!("High glycemic load ({:.1}, 15-24 range)", gl),
            ))
        } else {
            None
        }
    }
}

/// Total energy of the portion.
pub struct CalorieRule;

impl GuardrailRule for CalorieRule {
    fn name(&self) -> &'static str {
        "calories"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding> {
        let calories = ctx.features.calories_effective_kcal;

        if calories >= 800.0 {
            Some(RuleFinding::new(
                self.name(),
                RiskVerdict::Unsafe,
                format!("Very high calorie meal ({:.0} kcal ≥800)", calories),
            ))
        } else if calories >= 700.0 {
            Some(RuleFinding::new(
                self.name(),
                RiskVerdict::Caution,
                format!("High calorie meal ({:.0} kcal, 700-799 range)", calories),
            ))
        } else {
            None
        }
    }
}

/// The general rule set in evaluation order.
pub fn standard_rules() -> Vec<Box<dyn GuardrailRule>> {
    vec![
        Box::new(AvoidFlagRule),
        Box::new(PortionSanityRule),
        Box::new(SugarLoadRule),
        Box::new(GlycemicLoadRule),
        Box::new(CalorieRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(multiplier: f64, sugar: f64, gl: f64, calories: f64) -> PortionFeatures {
        PortionFeatures {
            portion_g: multiplier * 100.0,
            portion_multiplier: multiplier,
            carbs_effective_g: 0.0,
            sugar_effective_g: sugar,
            calories_effective_kcal: calories,
            gl_portion: gl,
            fiber_to_carb_ratio: 0.0,
            protein_to_carb_ratio: 0.0,
            energy_density: 0.0,
            glycemic_index: 50.0,
        }
    }

    fn run(rule: &dyn GuardrailRule, avoid: bool, f: &PortionFeatures) -> Option<RiskVerdict> {
        let food = FoodRecord {
            avoid_for_condition: avoid,
            ..FoodRecord::with_defaults("Test dish")
        };
        let ctx = RuleContext {
            food: &food,
            features: f,
            category: FoodCategory::Vegetables,
            user: None,
        };
        rule.evaluate(&ctx).map(|finding| finding.verdict)
    }

    #[test]
    fn avoid_flag_ignored_when_not_set() {
        assert_eq!(run(&AvoidFlagRule, false, &features(10.0, 100.0, 100.0, 0.0)), None);
    }

    #[test]
    fn avoid_flag_defers_for_low_impact_portions() {
        assert_eq!(run(&AvoidFlagRule, true, &features(0.3, 3.6, 4.0, 0.0)), None);
        assert_eq!(run(&AvoidFlagRule, true, &features(3.0, 10.0, 8.0, 0.0)), None);
    }

    #[test]
    fn avoid_flag_high_sugar_and_gl() {
        assert_eq!(
            run(&AvoidFlagRule, true, &features(1.0, 25.0, 15.0, 0.0)),
            Some(RiskVerdict::Unsafe)
        );
        assert_eq!(
            run(&AvoidFlagRule, true, &features(0.9, 30.0, 20.0, 0.0)),
            Some(RiskVerdict::Caution)
        );
    }

    #[test]
    fn avoid_flag_low_band_needs_large_portions() {
        assert_eq!(run(&AvoidFlagRule, true, &features(2.9, 12.0, 9.0, 0.0)), None);
        assert_eq!(
            run(&AvoidFlagRule, true, &features(3.5, 12.0, 9.0, 0.0)),
            Some(RiskVerdict::Caution)
        );
        assert_eq!(
            run(&AvoidFlagRule, true, &features(4.0, 20.0, 15.0, 0.0)),
            Some(RiskVerdict::Unsafe)
        );
    }

    #[test]
    fn avoid_flag_medium_band() {
        // sugar above 20 but below 25: neither the high nor the low band
        assert_eq!(run(&AvoidFlagRule, true, &features(1.4, 22.0, 10.0, 0.0)), None);
        assert_eq!(
            run(&AvoidFlagRule, true, &features(1.5, 22.0, 10.0, 0.0)),
            Some(RiskVerdict::Caution)
        );
        assert_eq!(
            run(&AvoidFlagRule, true, &features(2.0, 22.0, 10.0, 0.0)),
            Some(RiskVerdict::Unsafe)
        );
    }

    #[test]
    fn portion_sanity_bands() {
        assert_eq!(
            run(&PortionSanityRule, false, &features(5.0, 0.0, 0.0, 0.0)),
            Some(RiskVerdict::Unsafe)
        );
        assert_eq!(
            run(&PortionSanityRule, false, &features(3.0, 20.0, 0.0, 0.0)),
            Some(RiskVerdict::Unsafe)
        );
        assert_eq!(
            run(&PortionSanityRule, false, &features(3.0, 0.0, 15.0, 0.0)),
            Some(RiskVerdict::Unsafe)
        );
        assert_eq!(
            run(&PortionSanityRule, false, &features(4.9, 5.0, 5.0, 0.0)),
            Some(RiskVerdict::Caution)
        );
        assert_eq!(
            run(&PortionSanityRule, false, &features(2.0, 15.0, 0.0, 0.0)),
            Some(RiskVerdict::Caution)
        );
        assert_eq!(
            run(&PortionSanityRule, false, &features(2.5, 14.9, 11.9, 0.0)),
            None
        );
        assert_eq!(run(&PortionSanityRule, false, &features(1.9, 50.0, 50.0, 0.0)), None);
    }

    #[test]
    fn sugar_gl_and_calorie_bands() {
        assert_eq!(run(&SugarLoadRule, false, &features(1.0, 40.0, 0.0, 0.0)), Some(RiskVerdict::Unsafe));
        assert_eq!(run(&SugarLoadRule, false, &features(1.0, 30.0, 0.0, 0.0)), Some(RiskVerdict::Caution));
        assert_eq!(run(&SugarLoadRule, false, &features(1.0, 29.9, 0.0, 0.0)), None);

        assert_eq!(run(&GlycemicLoadRule, false, &features(1.0, 0.0, 25.0, 0.0)), Some(RiskVerdict::Unsafe));
        assert_eq!(run(&GlycemicLoadRule, false, &features(1.0, 0.0, 15.0, 0.0)), Some(RiskVerdict::Caution));
        assert_eq!(run(&GlycemicLoadRule, false, &features(1.0, 0.0, 14.9, 0.0)), None);

        assert_eq!(run(&CalorieRule, false, &features(1.0, 0.0, 0.0, 800.0)), Some(RiskVerdict::Unsafe));
        assert_eq!(run(&CalorieRule, false, &features(1.0, 0.0, 0.0, 700.0)), Some(RiskVerdict::Caution));
        assert_eq!(run(&CalorieRule, false, &features(1.0, 0.0, 0.0, 699.0)), None);
    }

    #[test]
    fn standard_rules_keep_evaluation_order() {
        let names: Vec<_> = standard_rules().iter().map(|rule| rule.name()).collect();
        assert_eq!(
            names,
            vec!["avoid_flag", "portion_sanity", "sugar_load", "glycemic_load", "calories"]
        );
    }
}
