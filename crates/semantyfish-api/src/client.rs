//! Catalog API HTTP client

use crate::de::id_from_value;
use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Client for the SemantyFish catalog API
///
/// The base URL is whatever sits in front of the `resources/` tree: normally
/// the development relay (`http://localhost:3001/api`), or the catalog itself.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Base URL of the development relay
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3001/api";

    /// Create a new client with default transport settings
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, path: &str) -> String {
        format!("{}/resources/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "Fetching catalog resource");
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<u64>> {
        let url = self.resource_url(&format!(
            "search_species?{}={}",
            field,
            urlencoding::encode(value)
        ));
        let data: SearchResponse = self.get_json(&url).await?;

        Ok(data
            .results
            .unwrap_or_default()
            .iter()
            .filter_map(id_from_value)
            .collect())
    }

    /// Get species details by id
    ///
    /// A relay that flattens statuses answers 200 even for a missing species,
    /// so a body naming no species is reported as `CatalogError::NoRecord`.
    pub async fn get_species(&self, id: u64) -> Result<SpeciesPayload> {
        let url = self.resource_url(&format!("species/{}", id));
        let species: SpeciesPayload = self.get_json(&url).await?;

        if !species.is_identified() {
            return Err(CatalogError::NoRecord { url });
        }
        Ok(species)
    }

    /// Search species ids by scientific name
    ///
    /// The catalog matches case-sensitively, so callers normalise first.
    pub async fn search_by_scientific_name(&self, name: &str) -> Result<Vec<u64>> {
        self.search("scientific_name", name).await
    }

    /// Search species ids by genus
    pub async fn search_by_genus(&self, genus: &str) -> Result<Vec<u64>> {
        self.search("genus", genus).await
    }

    pub async fn get_genus(&self, code: u64) -> Result<GenusPayload> {
        self.get_json(&self.resource_url(&format!("genus/{}", code)))
            .await
    }

    pub async fn get_family(&self, code: u64) -> Result<FamilyPayload> {
        self.get_json(&self.resource_url(&format!("family/{}", code)))
            .await
    }

    pub async fn get_order(&self, code: u64) -> Result<RankPayload> {
        self.get_json(&self.resource_url(&format!("order/{}", code)))
            .await
    }

    pub async fn get_class(&self, code: u64) -> Result<RankPayload> {
        self.get_json(&self.resource_url(&format!("class/{}", code)))
            .await
    }

    /// Get the alternate common names of a species
    ///
    /// Entries that are bare strings are lifted into `CommonName { name, .. }`.
    pub async fn get_common_names(&self, id: u64) -> Result<Vec<CommonName>> {
        let url = self.resource_url(&format!("common_name/{}", id));
        let data: SearchResponse = self.get_json(&url).await?;

        Ok(data
            .results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(CommonName {
                    name: Some(name),
                    ..Default::default()
                }),
                Value::Object(_) => serde_json::from_value(entry).ok(),
                _ => None,
            })
            .collect())
    }
}
