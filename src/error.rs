//! Error types for recomendar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for recomendar operations.
///
/// Distinguishes fatal artifact problems (unreachable source, unparsable
/// payload, mispaired model dimensions) from recoverable user-input
/// rejections (`UnknownCategory`).
///
/// # Examples
///
/// ```
/// use recomendar::error::RecomendarError;
///
/// let err = RecomendarError::UnknownCategory {
///     field: "city".to_string(),
///     value: "Atlantis".to_string(),
/// };
/// assert!(err.to_string().contains("Atlantis"));
/// ```
#[derive(Debug)]
pub enum RecomendarError {
    /// Artifact source unreachable or payload unparsable. Fatal to the
    /// session; surfaced directly, never retried.
    ArtifactLoad {
        /// Stable artifact name (see `ArtifactId::name`)
        artifact: String,
        /// Underlying failure description
        message: String,
    },

    /// User-supplied city/cuisine not in the encoder's known vocabulary.
    /// Recoverable: the query is aborted before cluster resolution.
    UnknownCategory {
        /// Offending field ("city" or "cuisine")
        field: String,
        /// Rejected value
        value: String,
    },

    /// Encoded vector arity disagrees with a model's trained dimensionality.
    /// An artifact-pairing bug, not a user input error.
    SchemaMismatch {
        /// Which transform detected the mismatch
        context: String,
        /// Expected feature count
        expected: usize,
        /// Actual feature count
        actual: usize,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for RecomendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecomendarError::ArtifactLoad { artifact, message } => {
                write!(f, "Artifact load failed: {artifact}: {message}")
            }
            RecomendarError::UnknownCategory { field, value } => {
                write!(f, "Unknown {field}: '{value}' is not a known {field}")
            }
            RecomendarError::SchemaMismatch {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Schema mismatch in {context}: expected {expected} features, got {actual}"
                )
            }
            RecomendarError::Io(e) => write!(f, "I/O error: {e}"),
            RecomendarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RecomendarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecomendarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RecomendarError {
    fn from(err: std::io::Error) -> Self {
        RecomendarError::Io(err)
    }
}

impl From<&str> for RecomendarError {
    fn from(msg: &str) -> Self {
        RecomendarError::Other(msg.to_string())
    }
}

impl From<String> for RecomendarError {
    fn from(msg: String) -> Self {
        RecomendarError::Other(msg)
    }
}

impl RecomendarError {
    /// Create an artifact load error with the offending artifact name
    #[must_use]
    pub fn artifact_load(artifact: &str, message: impl fmt::Display) -> Self {
        Self::ArtifactLoad {
            artifact: artifact.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an unknown category rejection for a user-facing field
    #[must_use]
    pub fn unknown_category(field: &str, value: &str) -> Self {
        Self::UnknownCategory {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a schema mismatch error with the detecting context
    #[must_use]
    pub fn schema_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::SchemaMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecomendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_load_display() {
        let err = RecomendarError::artifact_load("scaler", "connection refused");
        let msg = err.to_string();
        assert!(msg.contains("Artifact load failed"));
        assert!(msg.contains("scaler"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_unknown_category_display() {
        let err = RecomendarError::unknown_category("city", "Atlantis");
        let msg = err.to_string();
        assert!(msg.contains("city"));
        assert!(msg.contains("Atlantis"));
    }

    #[test]
    fn test_schema_mismatch_display() {
        let err = RecomendarError::schema_mismatch("cluster model input", 45, 3);
        let msg = err.to_string();
        assert!(msg.contains("Schema mismatch"));
        assert!(msg.contains("cluster model input"));
        assert!(msg.contains("45"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RecomendarError::Io(io_err);
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_from_str() {
        let err: RecomendarError = "test error".into();
        assert!(matches!(err, RecomendarError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: RecomendarError = "test error".to_string().into();
        assert!(matches!(err, RecomendarError::Other(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: RecomendarError = io_err.into();
        assert!(matches!(err, RecomendarError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RecomendarError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = RecomendarError::Other("test".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_error_debug_impl() {
        let err = RecomendarError::unknown_category("cuisine", "Martian");
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("UnknownCategory"));
    }
}
