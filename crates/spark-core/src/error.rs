//! Error types for Spark.

use thiserror::Error;

/// Error shared by every Spark crate.
#[derive(Error, Debug, Clone)]
pub enum SparkError {
    /// Reading or writing local storage failed.
    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON" or "base64"
        message: String,
    },

    /// Missing or unusable `secret.json` / environment settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generation service rejected the request or could not be reached.
    #[error("Gateway error{}: {message}", .status_code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Gateway {
        status_code: Option<u16>,
        message: String,
    },

    /// The generation service answered with something unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SparkError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn gateway(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Gateway {
            status_code,
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// True for failures of the generation service, including unusable answers.
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. } | Self::InvalidResponse(_))
    }
}

impl From<std::io::Error> for SparkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SparkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SparkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_display_with_status() {
        let err = SparkError::gateway(Some(503), "UNAVAILABLE: overloaded");
        assert_eq!(err.to_string(), "Gateway error (503): UNAVAILABLE: overloaded");
        assert!(err.is_gateway());
    }

    #[test]
    fn test_gateway_display_without_status() {
        let err = SparkError::gateway(None, "connection refused");
        assert_eq!(err.to_string(), "Gateway error: connection refused");
    }

    #[test]
    fn test_from_json_error() {
        let err: SparkError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(err.is_serialization());
        assert!(!err.is_gateway());
    }
}
