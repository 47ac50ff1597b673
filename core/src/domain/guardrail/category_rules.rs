use crate::domain::{
    food::FoodCategory,
    guardrail::{
        rules::{GuardrailRule, RuleContext, RuleFinding},
        verdict::RiskVerdict,
    },
};

/// Judges the portion by what kind of food it is. Vegetables and lentils lean
/// safe, desserts are judged on sugar, grains and bread on glycemic load.
/// Dairy, fruits, snacks and beverages have no category opinion.
pub struct CategoryProfileRule;

impl CategoryProfileRule {
    fn vegetables(ctx: &RuleContext<'_>) -> (RiskVerdict, String) {
        let f = ctx.features;

        if f.gl_portion <= 15.0 && f.sugar_effective_g <= 12.0 {
            if f.portion_multiplier >= 4.0 {
                (
                    RiskVerdict::Caution,
                    format!(
                        "Very large vegetable portion ({:.1}×), healthy but excessive",
                        f.portion_multiplier
                    ),
                )
            } else {
                (
                    RiskVerdict::Safe,
                    "Vegetable dish, encouraged in daily meals".to_string(),
                )
            }
        } else if f.gl_portion <= 25.0 && f.sugar_effective_g <= 20.0 {
            (
                RiskVerdict::Caution,
                "Vegetable dish with moderate GL/sugar".to_string(),
            )
        } else {
            (
                RiskVerdict::Caution,
                "High GL/sugar vegetable preparation, check ingredients".to_string(),
            )
        }
    }

    fn lentils(ctx: &RuleContext<'_>) -> (RiskVerdict, String) {
        let f = ctx.features;

        if f.gl_portion <= 20.0 && f.sugar_effective_g <= 15.0 {
            if f.portion_multiplier >= 3.0 {
                (
                    RiskVerdict::Caution,
                    format!("Large lentil portion ({:.1}×)", f.portion_multiplier),
                )
            } else {
                (
                    RiskVerdict::Safe,
                    "Lentil dish, good protein and fiber source".to_string(),
                )
            }
        } else if f.gl_portion <= 35.0 {
            (
                RiskVerdict::Caution,
                "Moderate GL lentil preparation, watch portion".to_string(),
            )
        } else {
            (
                RiskVerdict::Caution,
                "High GL lentil dish, may contain added sugar or refined flour".to_string(),
            )
        }
    }

    fn desserts(ctx: &RuleContext<'_>) -> (RiskVerdict, String) {
        let sugar = ctx.features.sugar_effective_g;
        let sugar_per_100g = ctx.food.sugar_g * 100.0 / ctx.food.effective_serving_size_g();

        if sugar_per_100g >= 10.0 || sugar >= 6.0 {
            (
                RiskVerdict::Unsafe,
                format!("High-sugar dessert ({:.1}g sugar)", sugar),
            )
        } else if sugar_per_100g >= 5.0 || sugar >= 3.0 {
            (
                RiskVerdict::Caution,
                format!("Moderate-sugar dessert ({:.1}g sugar), small portions only", sugar),
            )
        } else {
            (
                RiskVerdict::Caution,
                "Low-sugar dessert, still watch portion size".to_string(),
            )
        }
    }

    fn gl_banded(
        ctx: &RuleContext<'_>,
        label: &str,
        safe_up_to: f64,
        caution_up_to: f64,
    ) -> (RiskVerdict, String) {
        let gl = ctx.features.gl_portion;

        if gl <= safe_up_to {
            (
                RiskVerdict::Safe,
                format!("Reasonable {} portion (GL {:.1})", label, gl),
            )
        } else if gl <= caution_up_to {
            (
                RiskVerdict::Caution,
                format!("Moderate {} portion (GL {:.1}), watch blood sugar", label, gl),
            )
        } else {
            (
                RiskVerdict::Unsafe,
                format!("High GL {} portion ({:.1})", label, gl),
            )
        }
    }
}

impl GuardrailRule for CategoryProfileRule {
    fn name(&self) -> &'static str {
        "category_profile"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding> {
        let (verdict, reason) = match ctx.category {
            FoodCategory::Vegetables => Self::vegetables(ctx),
            FoodCategory::Lentils => Self::lentils(ctx),
            FoodCategory::Desserts => Self::desserts(ctx),
            FoodCategory::Grains => Self::gl_banded(ctx, "grain", 10.0, 20.0),
            FoodCategory::Bread => Self::gl_banded(ctx, "bread", 15.0, 25.0),
            FoodCategory::Dairy
            | FoodCategory::Fruits
            | FoodCategory::Snacks
            | FoodCategory::Beverages => return None,
        };

        Some(RuleFinding {
            rule: self.name(),
            verdict,
            reason,
        })
    }
}

/// Forces UNSAFE for extreme sugar, glycemic load or portion size whatever the
/// category said. Reports only the first condition that holds.
pub struct ExtremeLoadRule;

impl GuardrailRule for ExtremeLoadRule {
    fn name(&self) -> &'static str {
        "extreme_load"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleFinding> {
        let f = ctx.features;

        let reason = if f.sugar_effective_g >= 30.0 {
            format!("Very high sugar load ({:.1}g), dangerous for diabetes", f.sugar_effective_g)
        } else if f.gl_portion >= 40.0 {
            format!("Very high glycemic load ({:.1}), will spike blood sugar", f.gl_portion)
        } else if f.portion_multiplier >= 6.0 {
            format!("Extremely large portion ({:.1}×)", f.portion_multiplier)
        } else {
            return None;
        };

        Some(RuleFinding {
            rule: self.name(),
            verdict: RiskVerdict::Unsafe,
            reason,
        })
    }
}

pub fn category_aware_rules() -> Vec<Box<dyn GuardrailRule>> {
    vec![Box::new(CategoryProfileRule), Box::new(ExtremeLoadRule)]
}
