use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::prediction::fuser::FusionPolicy;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct DialogConfig {
    pub dataset: DatasetConfig,
    pub classifier: ClassifierConfig,
    pub prediction_log: PredictionLogConfig,
    pub engine: EngineConfig,
}

#[derive(Clone, Debug)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub enum ClassifierConfig {
    /// No model loaded; every prediction runs in guardrails-only mode.
    #[default]
    Disabled,
    Logistic {
        model_path: PathBuf,
    },
    Remote {
        endpoint: String,
        timeout_secs: u64,
    },
}

#[derive(Clone, Debug, Default)]
pub struct PredictionLogConfig {
    /// JSON-lines file receiving prediction and meal-log entries. `None` disables persistence.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub fusion: FusionPolicy,
    /// Portions above this mass are flagged as implausible (never rejected).
    pub implausible_portion_g: f64,
    pub suggestion_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fusion: FusionPolicy::default(),
            implausible_portion_g: 2000.0,
            suggestion_limit: 5,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
