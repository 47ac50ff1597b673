use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    prediction::{
        entities::{ClassifierPrediction, MealLogSummary, PredictionLogEntry, PredictionResult},
        features::FeatureVector,
        value_objects::{MealLogInput, MealLogOutcome, PredictMealInput},
    },
};

/// Trained binary risk model. A single inference call, never retried.
#[cfg_attr(test, mockall::automock)]
pub trait RiskClassifier: Send + Sync {
    fn predict(
        &self,
        features: FeatureVector,
    ) -> impl Future<Output = Result<ClassifierPrediction, CoreError>> + Send;
}

/// Sink for meal-log records. Failures are reported but never fail a prediction.
#[cfg_attr(test, mockall::automock)]
pub trait PredictionLog: Send + Sync {
    fn record_prediction(
        &self,
        entry: PredictionLogEntry,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn record_summary(
        &self,
        summary: MealLogSummary,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait MealSafetyService: Send + Sync {
    fn predict_meal(
        &self,
        input: PredictMealInput,
    ) -> impl Future<Output = Result<PredictionResult, CoreError>> + Send;

    fn log_meals(
        &self,
        input: MealLogInput,
    ) -> impl Future<Output = Result<MealLogOutcome, CoreError>> + Send;
}
