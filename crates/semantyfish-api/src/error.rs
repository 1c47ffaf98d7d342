//! Error types for the catalog API client

use std::fmt;

/// Errors that can occur when interacting with the catalog API
#[derive(Debug)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived
    Http(reqwest::Error),
    /// The catalog answered with a non-success status
    Status { url: String, status: u16 },
    /// Failed to parse JSON response
    Json(serde_json::Error),
    /// A 200 answer that does not describe any species, e.g. a relayed
    /// `{"detail": "Not found."}`
    NoRecord { url: String },
}

impl CatalogError {
    /// Upstream status code, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) | Self::NoRecord { .. } => None,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "catalog HTTP error: {}", e),
            Self::Status { url, status } => {
                write!(f, "catalog returned status {} for {}", status, url)
            }
            Self::Json(e) => write!(f, "catalog JSON parse error: {}", e),
            Self::NoRecord { url } => write!(f, "catalog has no species record at {}", url),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Status { .. } | Self::NoRecord { .. } => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for catalog API operations
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status {
            url: "http://localhost/resources/species/143".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "catalog returned status 404 for http://localhost/resources/species/143"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_json_error_has_source() {
        let inner = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CatalogError::from(inner);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("catalog JSON parse error"));
        assert_eq!(err.status(), None);
    }
}
