pub mod logistic;
pub mod remote;

pub use logistic::{LogisticModelArtifact, LogisticRiskClassifier};
pub use remote::RemoteRiskClassifier;

use crate::domain::{
    common::entities::app_errors::CoreError,
    prediction::{entities::ClassifierPrediction, features::FeatureVector, ports::RiskClassifier},
};

/// The classifier backends selectable from configuration.
#[derive(Debug, Clone)]
pub enum ModelClassifier {
    Logistic(LogisticRiskClassifier),
    Remote(RemoteRiskClassifier),
}

impl RiskClassifier for ModelClassifier {
    async fn predict(&self, features: FeatureVector) -> Result<ClassifierPrediction, CoreError> {
        match self {
            ModelClassifier::Logistic(classifier) => classifier.predict(features).await,
            ModelClassifier::Remote(classifier) => classifier.predict(features).await,
        }
    }
}
