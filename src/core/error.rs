use thiserror::Error;

/// Errors that can occur while pricing, building or parsing documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CotizaError {
    /// Engine input out of range: negative quantity or price, a percentage
    /// outside 0..=100, an advance larger than the total.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// One or more document validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Folio sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Malformed record received from the backend.
    #[error("parse error: {0}")]
    Parse(String),
}

impl CotizaError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[0].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Rule ID if applicable (e.g. "COT-03").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

/// Join collected validation errors into a single [`CotizaError::Validation`].
pub(crate) fn join_errors(errors: &[ValidationError]) -> CotizaError {
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    CotizaError::Validation(msg)
}
