//! Error types for the infrastructure-as-code agents

use thiserror::Error;

/// IaC routing errors
#[derive(Debug, Error)]
pub enum IacError {
    /// A routing keyword could not be compiled
    #[error("Invalid routing pattern for '{phrase}': {reason}")]
    InvalidPattern { phrase: String, reason: String },

    /// Unknown specialist name
    #[error("Unknown specialist: {0} (expected 'terraform_config_gen' or 'kubectl_manifest_gen')")]
    UnknownSpecialist(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for IaC operations
pub type Result<T> = std::result::Result<T, IacError>;

impl From<IacError> for agent_core::Error {
    fn from(err: IacError) -> Self {
        match err {
            IacError::InvalidPattern { .. } | IacError::ConfigError(_) => {
                agent_core::Error::InitializationFailed(err.to_string())
            }
            IacError::UnknownSpecialist(_) => agent_core::Error::ProcessingFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_agent_error() {
        let err: agent_core::Error = IacError::ConfigError("bad".to_string()).into();
        assert!(matches!(err, agent_core::Error::InitializationFailed(_)));

        let err: agent_core::Error = IacError::UnknownSpecialist("helm_gen".to_string()).into();
        assert!(matches!(err, agent_core::Error::ProcessingFailed(ref m) if m.contains("helm_gen")));
    }
}
