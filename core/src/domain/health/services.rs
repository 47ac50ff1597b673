use crate::domain::{
    common::services::Service,
    food::ports::FoodCatalog,
    health::{entities::EngineStatus, ports::HealthCheckService},
    prediction::ports::{PredictionLog, RiskClassifier},
};

impl<FC, RC, PL> HealthCheckService for Service<FC, RC, PL>
where
    FC: FoodCatalog,
    RC: RiskClassifier,
    PL: PredictionLog,
{
    fn engine_status(&self) -> EngineStatus {
        EngineStatus {
            model_loaded: self.risk_classifier.is_some(),
            foods_count: self.food_catalog.len(),
        }
    }
}
