use crate::domain::health::entities::EngineStatus;

pub trait HealthCheckService: Send + Sync {
    fn engine_status(&self) -> EngineStatus;
}
