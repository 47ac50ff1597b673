use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Food '{query}' not found{}", format_suggestions(.suggestions))]
    NotFound {
        query: String,
        suggestions: Vec<String>,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Risk classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Errors the caller caused and can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound { .. } | CoreError::InvalidQuantity(_)
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean: {}", suggestions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_suggestions() {
        let err = CoreError::NotFound {
            query: "dal".to_string(),
            suggestions: vec!["Mixed dal".to_string(), "Moong dal".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Food 'dal' not found. Did you mean: Mixed dal, Moong dal"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn not_found_without_suggestions() {
        let err = CoreError::NotFound {
            query: "pizza".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "Food 'pizza' not found");
    }

    #[test]
    fn classifier_errors_are_not_client_errors() {
        assert!(!CoreError::ClassifierUnavailable("not loaded".into()).is_client_error());
        assert!(CoreError::InvalidQuantity("0".into()).is_client_error());
    }
}
