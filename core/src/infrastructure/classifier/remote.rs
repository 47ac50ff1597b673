use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError,
    prediction::{
        entities::ClassifierPrediction,
        features::{FEATURE_NAMES, FeatureVector},
        ports::RiskClassifier,
    },
};

/// Risk model served over HTTP. Each prediction is one POST, never retried.
#[derive(Debug, Clone)]
pub struct RemoteRiskClassifier {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a [f64],
    feature_names: &'a [&'static str],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    label: u8,
    confidence: f64,
}

impl RemoteRiskClassifier {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build risk model HTTP client: {}", e);
            CoreError::ClassifierUnavailable(format!("cannot build HTTP client: {}", e))
        })?;

        Ok(Self { endpoint, client })
    }
}

impl RiskClassifier for RemoteRiskClassifier {
    async fn predict(&self, features: FeatureVector) -> Result<ClassifierPrediction, CoreError> {
        let request = PredictRequest {
            features: features.values(),
            feature_names: &FEATURE_NAMES,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Risk model request failed: {}", e);
                CoreError::ExternalServiceError(format!("risk model request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Risk model error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "risk model returned error: {} - {}",
                status, error_text
            )));
        }

        let body: PredictResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse risk model response: {}", e);
            CoreError::ExternalServiceError(format!("failed to parse risk model response: {}", e))
        })?;

        if body.label > 1 || !(0.0..=1.0).contains(&body.confidence) {
            return Err(CoreError::ExternalServiceError(format!(
                "risk model answered out of range: label {} confidence {}",
                body.label, body.confidence
            )));
        }

        Ok(ClassifierPrediction {
            label: body.label,
            confidence: body.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_names_every_feature() {
        let vector = FeatureVector::from([1.0; 13]);
        let request = PredictRequest {
            features: vector.values(),
            feature_names: &FEATURE_NAMES,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["features"].as_array().unwrap().len(), 13);
        assert_eq!(json["feature_names"][12], "glycemic_index");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_external_error() {
        let classifier = RemoteRiskClassifier::new(
            "http://127.0.0.1:9/predict".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();

        let err = classifier
            .predict(FeatureVector::from([0.0; 13]))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }
}
