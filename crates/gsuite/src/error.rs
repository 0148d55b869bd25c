use thiserror::Error;

use crate::auth::AuthError;

/// Failures from one Google API call. The export layer converts these into
/// structured outcomes; nothing here escapes as a panic.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{service} returned {status}: {message}")]
    Api { service: &'static str, status: u16, message: String },
    #[error("unexpected response shape from {service}: {message}")]
    Decode { service: &'static str, message: String },
}

impl From<ServiceError> for waypoint_core::ApplicationError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Auth(cause) => Self::Configuration(cause.to_string()),
            other => Self::Integration(other.to_string()),
        }
    }
}

/// Pass through successful responses, otherwise capture status and body.
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(ServiceError::Api { service, status: status.as_u16(), message })
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::auth::AuthError;
    use waypoint_core::ApplicationError;

    #[test]
    fn auth_failures_classify_as_configuration() {
        let error = ApplicationError::from(ServiceError::Auth(AuthError::Misconfigured(
            "no key file".to_owned(),
        )));
        assert!(matches!(error, ApplicationError::Configuration(_)));
        assert!(error.is_preflight());
    }

    #[test]
    fn api_failures_classify_as_integration() {
        let error = ApplicationError::from(ServiceError::Api {
            service: "docs",
            status: 500,
            message: "backend unavailable".to_owned(),
        });
        assert!(matches!(error, ApplicationError::Integration(_)));
        assert!(!error.is_preflight());
        assert_eq!(
            error.to_string(),
            "integration failure: docs returned 500: backend unavailable"
        );
    }
}
