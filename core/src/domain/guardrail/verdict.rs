use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Three-level meal risk, ordered by severity: `Safe < Caution < Unsafe`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskVerdict {
    Safe,
    Caution,
    Unsafe,
}

impl RiskVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskVerdict::Safe => "safe",
            RiskVerdict::Caution => "caution",
            RiskVerdict::Unsafe => "unsafe",
        }
    }

    /// Combine with an optional current verdict without ever lowering severity.
    pub fn escalate(current: Option<RiskVerdict>, next: RiskVerdict) -> RiskVerdict {
        match current {
            Some(current) => current.max(next),
            None => next,
        }
    }
}

impl fmt::Display for RiskVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order() {
        assert!(RiskVerdict::Safe < RiskVerdict::Caution);
        assert!(RiskVerdict::Caution < RiskVerdict::Unsafe);
    }

    #[test]
    fn escalate_never_downgrades() {
        assert_eq!(
            RiskVerdict::escalate(Some(RiskVerdict::Unsafe), RiskVerdict::Caution),
            RiskVerdict::Unsafe
        );
        assert_eq!(
            RiskVerdict::escalate(Some(RiskVerdict::Safe), RiskVerdict::Caution),
            RiskVerdict::Caution
        );
        assert_eq!(RiskVerdict::escalate(None, RiskVerdict::Safe), RiskVerdict::Safe);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RiskVerdict::Caution).unwrap(),
            "\"caution\""
        );
    }
}
