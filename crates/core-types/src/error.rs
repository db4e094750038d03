use serde_json::{Map, Value};
use thiserror::Error;

/// Structured diagnostic context attached to a [`DomainError`],
/// e.g. `{"record_id": 7}`.
pub type ErrorDetails = Map<String, Value>;

/// The closed classification of domain failures.
///
/// The transport boundary maps each kind to a status code; this mapping
/// is a published contract and must stay stable across transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested entity does not exist upstream.
    NotFound,
    /// Caller-supplied data violates a precondition.
    Validation,
    /// Failure while retrieving data from the external source.
    Provider,
    /// Failure during computation.
    Calculator,
    /// Catch-all wrapper; nothing crosses the service boundary raw.
    Application,
    /// An escaped defect, materialized only at the outermost boundary.
    Unexpected,
}

/// A typed domain failure: a kind, a human-readable message, and a
/// structured detail map.
///
/// Errors are value objects. They are created at the failure site with
/// the builder-style constructors below and never mutated afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{message}")]
    NotFound { message: String, details: ErrorDetails },

    #[error("{message}")]
    Validation { message: String, details: ErrorDetails },

    #[error("{message}")]
    Provider { message: String, details: ErrorDetails },

    #[error("{message}")]
    Calculator { message: String, details: ErrorDetails },

    #[error("{message}")]
    Application { message: String, details: ErrorDetails },

    #[error("{message}")]
    Unexpected { message: String, details: ErrorDetails },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound { message: message.into(), details: ErrorDetails::new() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation { message: message.into(), details: ErrorDetails::new() }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        DomainError::Provider { message: message.into(), details: ErrorDetails::new() }
    }

    pub fn calculator(message: impl Into<String>) -> Self {
        DomainError::Calculator { message: message.into(), details: ErrorDetails::new() }
    }

    pub fn application(message: impl Into<String>) -> Self {
        DomainError::Application { message: message.into(), details: ErrorDetails::new() }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        DomainError::Unexpected { message: message.into(), details: ErrorDetails::new() }
    }

    /// Attaches one key/value pair of diagnostic context.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details_mut().insert(key.to_string(), value.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::Provider { .. } => ErrorKind::Provider,
            DomainError::Calculator { .. } => ErrorKind::Calculator,
            DomainError::Application { .. } => ErrorKind::Application,
            DomainError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound { message, .. }
            | DomainError::Validation { message, .. }
            | DomainError::Provider { message, .. }
            | DomainError::Calculator { message, .. }
            | DomainError::Application { message, .. }
            | DomainError::Unexpected { message, .. } => message,
        }
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            DomainError::NotFound { details, .. }
            | DomainError::Validation { details, .. }
            | DomainError::Provider { details, .. }
            | DomainError::Calculator { details, .. }
            | DomainError::Application { details, .. }
            | DomainError::Unexpected { details, .. } => details,
        }
    }

    fn details_mut(&mut self) -> &mut ErrorDetails {
        match self {
            DomainError::NotFound { details, .. }
            | DomainError::Validation { details, .. }
            | DomainError::Provider { details, .. }
            | DomainError::Calculator { details, .. }
            | DomainError::Application { details, .. }
            | DomainError::Unexpected { details, .. } => details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        let err = DomainError::not_found("record 7 not found");
        assert_eq!(err.to_string(), "record 7 not found");
    }

    #[test]
    fn with_detail_accumulates_context() {
        let err = DomainError::provider("failed to provide record")
            .with_detail("record_id", 7)
            .with_detail("source", "postgres");

        assert_eq!(err.kind(), ErrorKind::Provider);
        assert_eq!(err.details().get("record_id"), Some(&Value::from(7)));
        assert_eq!(err.details().get("source"), Some(&Value::from("postgres")));
    }

    #[test]
    fn kind_classification_covers_every_variant() {
        assert_eq!(DomainError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(DomainError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(DomainError::provider("x").kind(), ErrorKind::Provider);
        assert_eq!(DomainError::calculator("x").kind(), ErrorKind::Calculator);
        assert_eq!(DomainError::application("x").kind(), ErrorKind::Application);
        assert_eq!(DomainError::unexpected("x").kind(), ErrorKind::Unexpected);
    }
}
