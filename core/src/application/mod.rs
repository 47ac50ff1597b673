use std::time::Duration;

use tracing::{info, warn};

use crate::{
    domain::common::{
        ClassifierConfig, DialogConfig, entities::app_errors::CoreError, services::Service,
    },
    infrastructure::{
        classifier::{LogisticRiskClassifier, ModelClassifier, RemoteRiskClassifier},
        food_catalog::InMemoryFoodCatalog,
        prediction_log::JsonlPredictionLog,
    },
};

pub type DialogService = Service<InMemoryFoodCatalog, ModelClassifier, JsonlPredictionLog>;

/// Build the engine from configuration. A missing or broken nutrition table is
/// fatal; a model that fails to load only disables the classifier.
pub async fn create_service(config: DialogConfig) -> Result<DialogService, CoreError> {
    let food_catalog =
        InMemoryFoodCatalog::from_csv_path(&config.dataset.path, config.engine.suggestion_limit)?;

    let classifier = match config.classifier {
        ClassifierConfig::Disabled => {
            info!("no risk model configured, predictions run on guardrails only");
            None
        }
        ClassifierConfig::Logistic { model_path } => {
            match LogisticRiskClassifier::from_path(&model_path).await {
                Ok(classifier) => Some(ModelClassifier::Logistic(classifier)),
                Err(e) => {
                    warn!(path = %model_path.display(), "risk model not loaded, predictions run on guardrails only: {}", e);
                    None
                }
            }
        }
        ClassifierConfig::Remote {
            endpoint,
            timeout_secs,
        } => {
            let classifier =
                RemoteRiskClassifier::new(endpoint.clone(), Duration::from_secs(timeout_secs))?;
            info!(endpoint = %endpoint, "using remote risk model");
            Some(ModelClassifier::Remote(classifier))
        }
    };

    let prediction_log = JsonlPredictionLog::new(config.prediction_log.path);

    Ok(Service::new(
        food_catalog,
        classifier,
        prediction_log,
        config.engine,
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::{
        common::{DatasetConfig, EngineConfig, PredictionLogConfig},
        health::ports::HealthCheckService,
    };

    fn config(dataset: std::path::PathBuf, classifier: ClassifierConfig) -> DialogConfig {
        DialogConfig {
            dataset: DatasetConfig { path: dataset },
            classifier,
            prediction_log: PredictionLogConfig::default(),
            engine: EngineConfig::default(),
        }
    }

    fn dataset() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dish_name,serving_size_g,carbs_g,sugar_g,avoid_for_diabetic").unwrap();
        writeln!(file, "Mixed dal,100,12,1,No").unwrap();
        file
    }

    #[tokio::test]
    async fn broken_model_only_disables_the_classifier() {
        let file = dataset();

        let service = create_service(config(
            file.path().to_path_buf(),
            ClassifierConfig::Logistic {
                model_path: "/nonexistent/model.json".into(),
            },
        ))
        .await
        .unwrap();

        let status = service.engine_status();
        assert!(!status.model_loaded);
        assert_eq!(status.foods_count, 1);
    }

    #[tokio::test]
    async fn missing_dataset_is_fatal() {
        let result = create_service(config(
            "/nonexistent/foods.csv".into(),
            ClassifierConfig::Disabled,
        ))
        .await;

        assert!(matches!(result, Err(CoreError::Dataset(_))));
    }
}
