//! Error types for spamscore

/// Result type alias using spamscore's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for spamscore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Artifact could not be read or decoded
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Vectorizer construction or transform errors
    #[error("vectorizer error: {0}")]
    Vectorizer(String),

    /// Classifier construction or inference errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new vectorizer error
    pub fn vectorizer(msg: impl Into<String>) -> Self {
        Self::Vectorizer(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short stable name of the variant, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Artifact(_) => "artifact",
            Self::Vectorizer(_) => "vectorizer",
            Self::Classifier(_) => "classifier",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = Error::classifier("feature dimension mismatch");
        assert_eq!(err.to_string(), "classifier error: feature dimension mismatch");
        assert_eq!(err.kind(), "classifier");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json.into();
        assert_eq!(err.kind(), "serialization");
    }
}
