//! Credential preconditions
//!
//! The model runtime needs an API key. Its absence is fatal and must be
//! detected before any provider is constructed or any request is sent.

use thiserror::Error;

/// Environment variable holding the Gemini API key
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

/// Credential errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The variable is unset
    #[error("{0} environment variable not set")]
    Missing(String),

    /// The variable is set but blank
    #[error("{0} environment variable is empty")]
    Empty(String),
}

/// Require a credential from the process environment
pub fn require_env(var: &str) -> Result<String, CredentialError> {
    require_with(var, |key| std::env::var(key).ok())
}

/// Require a credential through an arbitrary lookup
///
/// Surrounding whitespace is trimmed; a blank value counts as missing.
pub fn require_with<F>(var: &str, lookup: F) -> Result<String, CredentialError>
where
    F: FnOnce(&str) -> Option<String>,
{
    match lookup(var) {
        None => Err(CredentialError::Missing(var.to_string())),
        Some(value) if value.trim().is_empty() => Err(CredentialError::Empty(var.to_string())),
        Some(value) => Ok(value.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential() {
        let err = require_with(GOOGLE_API_KEY, |_| None).unwrap_err();
        assert_eq!(err, CredentialError::Missing(GOOGLE_API_KEY.to_string()));
        assert_eq!(err.to_string(), "GOOGLE_API_KEY environment variable not set");
    }

    #[test]
    fn test_blank_credential() {
        let err = require_with(GOOGLE_API_KEY, |_| Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, CredentialError::Empty(_)));
    }

    #[test]
    fn test_present_credential_trimmed() {
        let key = require_with(GOOGLE_API_KEY, |_| Some(" abc123\n".to_string())).unwrap();
        assert_eq!(key, "abc123");
    }
}
