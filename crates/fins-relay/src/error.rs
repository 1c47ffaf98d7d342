//! Error types for the FINS relay

use std::fmt;

#[derive(Debug)]
pub enum RelayError {
    /// Upstream request failed before a response arrived
    Upstream(reqwest::Error),
    /// Upstream body was not JSON
    Json(serde_json::Error),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Upstream(err) => write!(f, "Upstream request failed: {}", err),
            RelayError::Json(err) => write!(f, "Upstream returned invalid JSON: {}", err),
            RelayError::Io(err) => write!(f, "IO error: {}", err),
            RelayError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::Upstream(err) => Some(err),
            RelayError::Json(err) => Some(err),
            RelayError::Io(err) => Some(err.as_ref()),
            RelayError::Config(_) => None,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Upstream(err)
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Json(err)
    }
}

impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        RelayError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for RelayError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        RelayError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
