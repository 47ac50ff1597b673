pub mod category_rules;
pub mod engine;
pub mod rules;
pub mod verdict;

pub use category_rules::{CategoryProfileRule, ExtremeLoadRule, category_aware_rules};
pub use engine::{GuardrailEngine, GuardrailOutcome};
pub use rules::{GuardrailRule, RuleContext, RuleFinding, standard_rules};
pub use verdict::RiskVerdict;
