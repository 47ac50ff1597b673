use serde::{Deserialize, Serialize};

use crate::domain::{guardrail::RiskVerdict, prediction::entities::ClassifierPrediction};

/// Constants governing how guardrail verdicts and classifier answers combine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionPolicy {
    /// Confidence reported for every guardrail UNSAFE.
    pub unsafe_confidence: f64,
    /// A classifier SAFE must be strictly above this to lift a guardrail CAUTION.
    pub override_threshold: f64,
    /// Applied to the classifier confidence when it lifts a CAUTION.
    pub override_damping: f64,
    pub caution_floor: f64,
    /// Used when nothing fired and no usable classifier confidence exists.
    pub fallback_confidence: f64,
    pub category_safe_confidence: f64,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            unsafe_confidence: 0.95,
            override_threshold: 0.9,
            override_damping: 0.8,
            caution_floor: 0.7,
            fallback_confidence: 0.6,
            category_safe_confidence: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedDecision {
    pub verdict: RiskVerdict,
    pub confidence: f64,
}

impl FusionPolicy {
    pub fn fuse(
        &self,
        guardrail: Option<RiskVerdict>,
        classifier: Option<&ClassifierPrediction>,
    ) -> FusedDecision {
        let classifier_confidence = classifier.map(|prediction| sanitize(prediction.confidence));

        let (verdict, confidence) = match (guardrail, classifier) {
            (Some(RiskVerdict::Unsafe), _) => (RiskVerdict::Unsafe, self.unsafe_confidence),
            (Some(RiskVerdict::Caution), Some(prediction))
                if prediction.verdict() == RiskVerdict::Safe
                    && sanitize(prediction.confidence) > self.override_threshold =>
            {
                (
                    RiskVerdict::Safe,
                    sanitize(prediction.confidence) * self.override_damping,
                )
            }
            (Some(RiskVerdict::Caution), _) => (
                RiskVerdict::Caution,
                self.caution_floor
                    .max(classifier_confidence.unwrap_or(0.0)),
            ),
            (None | Some(RiskVerdict::Safe), Some(prediction)) => {
                let confidence = sanitize(prediction.confidence);
                let confidence = if confidence > 0.0 {
                    confidence
                } else {
                    self.fallback_confidence
                };
                (prediction.verdict(), confidence)
            }
            (Some(RiskVerdict::Safe), None) => {
                (RiskVerdict::Safe, self.category_safe_confidence)
            }
            (None, None) => (RiskVerdict::Caution, self.fallback_confidence),
        };

        FusedDecision {
            verdict,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

fn sanitize(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
