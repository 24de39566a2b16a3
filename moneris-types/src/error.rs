//! Error types for the payment client.

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Unknown currency: {0}. Supported: CAD, USD, EUR, GBP, INR, HKD")]
    UnknownCurrency(String),
}

/// A request field that is missing or malformed.
///
/// Raised before any request is built or sent; names the specific field so
/// the caller can surface it next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for the common "required field left blank" case.
    pub fn missing(field: &'static str) -> Self {
        Self::new(field, "must not be empty")
    }
}
