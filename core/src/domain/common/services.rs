use std::sync::Arc;

use crate::domain::{
    common::EngineConfig,
    food::ports::FoodCatalog,
    guardrail::GuardrailEngine,
    prediction::ports::{PredictionLog, RiskClassifier},
};

/// The engine's shared context, built once at startup and cloned into every
/// request handler. Holds no mutable state.
pub struct Service<FC, RC, PL>
where
    FC: FoodCatalog,
    RC: RiskClassifier,
    PL: PredictionLog,
{
    pub(crate) food_catalog: Arc<FC>,
    pub(crate) risk_classifier: Option<Arc<RC>>,
    pub(crate) prediction_log: Arc<PL>,
    pub(crate) engine: EngineConfig,
    pub(crate) guardrails: Arc<GuardrailEngine>,
    pub(crate) category_guardrails: Arc<GuardrailEngine>,
}

impl<FC, RC, PL> Service<FC, RC, PL>
where
    FC: FoodCatalog,
    RC: RiskClassifier,
    PL: PredictionLog,
{
    pub fn new(
        food_catalog: FC,
        risk_classifier: Option<RC>,
        prediction_log: PL,
        engine: EngineConfig,
    ) -> Self {
        Self {
            food_catalog: Arc::new(food_catalog),
            risk_classifier: risk_classifier.map(Arc::new),
            prediction_log: Arc::new(prediction_log),
            engine,
            guardrails: Arc::new(GuardrailEngine::standard()),
            category_guardrails: Arc::new(GuardrailEngine::category_aware()),
        }
    }
}

impl<FC, RC, PL> Clone for Service<FC, RC, PL>
where
    FC: FoodCatalog,
    RC: RiskClassifier,
    PL: PredictionLog,
{
    fn clone(&self) -> Self {
        Self {
            food_catalog: Arc::clone(&self.food_catalog),
            risk_classifier: self.risk_classifier.clone(),
            prediction_log: Arc::clone(&self.prediction_log),
            engine: self.engine.clone(),
            guardrails: Arc::clone(&self.guardrails),
            category_guardrails: Arc::clone(&self.category_guardrails),
        }
    }
}
