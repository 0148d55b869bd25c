use thiserror::Error;

/// Violations of the core's input contracts. These are programming errors on
/// well-formed input and propagate immediately; they are never retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failures surfaced at the application boundary. Service-call problems are
/// caught here and converted into structured outcomes by the export layer;
/// raw errors never cross the core boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Whether the failure happened before any remote mutation could have
    /// been attempted, i.e. no partial state exists to clean up.
    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplicationError, DomainError};

    #[test]
    fn domain_errors_wrap_transparently() {
        let error = ApplicationError::from(DomainError::InvariantViolation(
            "cost values must be finite".to_owned(),
        ));
        assert_eq!(error.to_string(), "domain invariant violation: cost values must be finite");
        assert!(error.is_preflight());
    }

    #[test]
    fn integration_failures_are_not_preflight() {
        let error = ApplicationError::Integration("docs batchUpdate returned 500".to_owned());
        assert!(!error.is_preflight());
    }

    #[test]
    fn configuration_failures_are_preflight() {
        assert!(ApplicationError::Configuration("missing key path".to_owned()).is_preflight());
    }
}
