//! Error types for the species explorer
//!
//! `Display` renders the message shown to the user when a search fails.

use semantyfish_api::CatalogError;
use std::fmt;

#[derive(Debug)]
pub enum ExplorerError {
    /// A search call against the catalog failed
    Catalog(CatalogError),
    /// The primary species fetch failed, so no record can be built
    DetailsUnavailable {
        species_id: u64,
        source: CatalogError,
    },
    /// Neither the scientific-name nor the genus search matched
    NotFound { query: String },
    /// A multi-result search where every candidate failed to load
    NoValidResults { query: String },
    Json(serde_json::Error),
    Config(String),
    Io(Box<std::io::Error>),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "{}", e),
            Self::DetailsUnavailable { species_id, source } => match source.status() {
                Some(status) => write!(
                    f,
                    "Could not fetch details for species id {}. Status: {}",
                    species_id, status
                ),
                None => write!(
                    f,
                    "Could not fetch details for species id {}: {}",
                    species_id, source
                ),
            },
            Self::NotFound { query } => write!(
                f,
                "No species found with the id, scientific name or genus \"{}\"",
                query
            ),
            Self::NoValidResults { query } => write!(
                f,
                "The search for \"{}\" returned no usable species ids, try a more specific query",
                query
            ),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::DetailsUnavailable { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<CatalogError> for ExplorerError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for ExplorerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Box::new(e))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ExplorerError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
