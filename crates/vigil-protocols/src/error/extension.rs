//! Registry-related errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Extension not found: {0}")]
    NotFound(String),

    #[error("Extension already registered: {0}")]
    AlreadyRegistered(String),

    #[error("{0}")]
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ExtensionError::NotFound("cpu".to_string());
        let display = err.to_string();
        assert!(display.contains("not found"));
        assert!(display.contains("cpu"));
    }

    #[test]
    fn test_already_registered_error() {
        let err = ExtensionError::AlreadyRegistered("log".to_string());
        let display = err.to_string();
        assert!(display.contains("already registered"));
        assert!(display.contains("log"));
    }

    #[test]
    fn test_custom_error() {
        let err = ExtensionError::Custom("custom error message".to_string());
        assert_eq!(err.to_string(), "custom error message");
    }
}
