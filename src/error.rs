//! Error types for the marketboard service.

use thiserror::Error;

/// Result type alias using the marketboard error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the service.
///
/// The transformation core raises only `NotFound` (unknown template id);
/// everything else originates at the service boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// External collaborator error (data provider, screener backend)
    #[error("External service error: {0}")]
    External(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check whether this is the template-lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound("template tpl_42".to_string());
        assert_eq!(err.to_string(), "Not found: template tpl_42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_external_is_not_not_found() {
        let err = Error::External("provider down".to_string());
        assert!(!err.is_not_found());
    }
}
