use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    common::entities::app_errors::CoreError,
    prediction::{
        entities::ClassifierPrediction,
        features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector},
        ports::RiskClassifier,
    },
};

fn default_threshold() -> f64 {
    0.5
}

/// Exported standardised logistic-regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModelArtifact {
    pub feature_names: Vec<String>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModelArtifact {
    fn validate(&self) -> Result<(), CoreError> {
        if self.feature_names.len() != FEATURE_COUNT
            || self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES)
                .any(|(name, expected)| name != expected)
        {
            return Err(CoreError::InvalidModel(format!(
                "feature_names must be {:?}, got {:?}",
                FEATURE_NAMES, self.feature_names
            )));
        }

        for (field, values) in [
            ("means", &self.means),
            ("scales", &self.scales),
            ("coefficients", &self.coefficients),
        ] {
            if values.len() != FEATURE_COUNT {
                return Err(CoreError::InvalidModel(format!(
                    "{} has {} values, expected {}",
                    field,
                    values.len(),
                    FEATURE_COUNT
                )));
            }
            if values.iter().any(|value| !value.is_finite()) {
                return Err(CoreError::InvalidModel(format!("{} contains non-finite values", field)));
            }
        }

        if !(self.intercept.is_finite() && self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(CoreError::InvalidModel(
                "intercept must be finite and threshold within (0, 1)".to_string(),
            ));
        }

        Ok(())
    }
}

/// Local inference over a [`LogisticModelArtifact`].
#[derive(Debug, Clone)]
pub struct LogisticRiskClassifier {
    artifact: LogisticModelArtifact,
}

impl LogisticRiskClassifier {
    pub fn new(artifact: LogisticModelArtifact) -> Result<Self, CoreError> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub async fn from_path(path: &Path) -> Result<Self, CoreError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            tracing::error!("Failed to read model artifact {}: {}", path.display(), e);
            CoreError::InvalidModel(format!("cannot read {}: {}", path.display(), e))
        })?;

        let artifact: LogisticModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| CoreError::InvalidModel(format!("cannot parse {}: {}", path.display(), e)))?;

        let classifier = Self::new(artifact)?;
        info!(path = %path.display(), "risk model loaded");

        Ok(classifier)
    }

    /// Probability of the safe class.
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let a = &self.artifact;
        let z = features
            .values()
            .iter()
            .enumerate()
            .fold(a.intercept, |acc, (i, x)| {
                // zero-variance columns were left unscaled at training time
                let scale = if a.scales[i] == 0.0 { 1.0 } else { a.scales[i] };
                acc + a.coefficients[i] * (x - a.means[i]) / scale
            });

        1.0 / (1.0 + (-z).exp())
    }
}

impl RiskClassifier for LogisticRiskClassifier {
    async fn predict(&self, features: FeatureVector) -> Result<ClassifierPrediction, CoreError> {
        let p = self.probability(&features);
        if !p.is_finite() {
            return Err(CoreError::ExternalServiceError(
                "risk model produced a non-finite probability".to_string(),
            ));
        }

        Ok(ClassifierPrediction {
            label: u8::from(p >= self.artifact.threshold),
            confidence: p.max(1.0 - p),
        })
    }
}
