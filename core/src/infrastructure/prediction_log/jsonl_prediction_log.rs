use std::path::PathBuf;

use serde::Serialize;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use tracing::debug;

use crate::domain::{
    common::entities::app_errors::CoreError,
    prediction::{
        entities::{MealLogSummary, PredictionLogEntry},
        ports::PredictionLog,
    },
};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum LogLine<'a> {
    Prediction(&'a PredictionLogEntry),
    Summary(&'a MealLogSummary),
}

/// Appends meal-log records to a JSON-lines file. Without a path every write
/// is a no-op.
#[derive(Debug)]
pub struct JsonlPredictionLog {
    path: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl JsonlPredictionLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    async fn append(&self, line: LogLine<'_>) -> Result<(), CoreError> {
        let Some(path) = &self.path else {
            debug!("prediction log disabled, dropping record");
            return Ok(());
        };

        let mut bytes = serde_json::to_vec(&line)
            .map_err(|e| CoreError::Persistence(format!("cannot encode log record: {}", e)))?;
        bytes.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| {
                tracing::error!("Failed to open prediction log {}: {}", path.display(), e);
                CoreError::Persistence(format!("cannot open {}: {}", path.display(), e))
            })?;

        file.write_all(&bytes).await.map_err(|e| {
            tracing::error!("Failed to write prediction log {}: {}", path.display(), e);
            CoreError::Persistence(format!("cannot write {}: {}", path.display(), e))
        })?;

        file.flush()
            .await
            .map_err(|e| CoreError::Persistence(format!("cannot flush {}: {}", path.display(), e)))
    }
}

impl PredictionLog for JsonlPredictionLog {
    async fn record_prediction(&self, entry: PredictionLogEntry) -> Result<(), CoreError> {
        self.append(LogLine::Prediction(&entry)).await
    }

    async fn record_summary(&self, summary: MealLogSummary) -> Result<(), CoreError> {
        self.append(LogLine::Summary(&summary)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        guardrail::RiskVerdict,
        prediction::entities::{MealRisk, MealTime},
    };

    fn entry() -> PredictionLogEntry {
        PredictionLogEntry {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            food_name: "Mixed dal".to_string(),
            quantity: 1.0,
            unit: "bowl".to_string(),
            grams: 150.0,
            meal_time: MealTime::Lunch,
            fasting_sugar: 100.0,
            post_meal_sugar: None,
            risk_level: RiskVerdict::Safe,
            confidence: 0.8,
            reasons: vec![],
            created_at: Utc::now(),
        }
    }

    fn summary() -> MealLogSummary {
        MealLogSummary {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            meals_count: 1,
            meals: vec![MealRisk {
                food_name: "Mixed dal".to_string(),
                risk_level: RiskVerdict::Safe,
            }],
            overall_risk: RiskVerdict::Safe,
            fasting_sugar: 100.0,
            post_meal_sugar: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn appends_tagged_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meals.jsonl");
        let log = JsonlPredictionLog::new(Some(path.clone()));

        log.record_prediction(entry()).await.unwrap();
        log.record_summary(summary()).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["kind"], "prediction");
        assert_eq!(lines[0]["food_name"], "Mixed dal");
        assert_eq!(lines[0]["risk_level"], "safe");
        assert_eq!(lines[1]["kind"], "summary");
        assert_eq!(lines[1]["meals_count"], 1);
        assert_eq!(lines[1]["meals"][0]["food_name"], "Mixed dal");
        assert_eq!(lines[1]["meals"][0]["risk_level"], "safe");
    }

    #[tokio::test]
    async fn disabled_log_accepts_everything() {
        let log = JsonlPredictionLog::disabled();

        assert!(log.record_prediction(entry()).await.is_ok());
        assert!(log.record_summary(summary()).await.is_ok());
    }

    #[tokio::test]
    async fn unwritable_path_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = JsonlPredictionLog::new(Some(dir.path().join("missing").join("meals.jsonl")));

        let err = log.record_prediction(entry()).await.unwrap_err();

        assert!(matches!(err, CoreError::Persistence(_)));
    }
}
