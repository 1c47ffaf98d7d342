//! Species resolution: turn a user query into species ids

use crate::error::{ExplorerError, Result};
use crate::query::{normalize_name, Query};
use crate::record::{present, text_or, NOT_AVAILABLE};
use futures::future::join_all;
use semantyfish_api::CatalogClient;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of resolving a query
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Exactly one species. `fallback_name` is the user's query when it came
    /// from a name search, for display if the catalog has no common name.
    Resolved {
        species_id: u64,
        fallback_name: Option<String>,
    },
    /// Several species matched; the caller has to pick one
    Candidates(Vec<SearchCandidate>),
}

/// One entry of a multi-result search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCandidate {
    pub species_id: u64,
    pub scientific_name: String,
    pub common_name: String,
}

#[derive(Clone)]
pub struct Resolver {
    client: CatalogClient,
}

impl Resolver {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Resolve a raw query.
    ///
    /// A positive integer is taken as the species id without any search.
    /// Anything else is normalised and searched by scientific name, then by
    /// genus if the first search finds nothing.
    pub async fn resolve(&self, raw: &str) -> Result<Resolution> {
        let query = raw.trim();
        let name = match Query::parse(query) {
            None => {
                return Err(ExplorerError::NotFound {
                    query: query.to_string(),
                })
            }
            Some(Query::Id(species_id)) => {
                debug!(species_id, "Query is a species id, skipping search");
                return Ok(Resolution::Resolved {
                    species_id,
                    fallback_name: None,
                });
            }
            Some(Query::Name(name)) => name,
        };

        let normalized = normalize_name(&name);
        let mut ids = self.client.search_by_scientific_name(&normalized).await?;
        if ids.is_empty() {
            debug!(query = %normalized, "No scientific name match, searching by genus");
            ids = self.client.search_by_genus(&normalized).await?;
        }

        info!(query = %normalized, results = ids.len(), "Species search complete");

        match ids.as_slice() {
            [] => Err(ExplorerError::NotFound {
                query: query.to_string(),
            }),
            [species_id] => Ok(Resolution::Resolved {
                species_id: *species_id,
                fallback_name: Some(query.to_string()),
            }),
            _ => {
                let candidates = self.load_candidates(&ids).await;
                if candidates.is_empty() {
                    return Err(ExplorerError::NoValidResults {
                        query: query.to_string(),
                    });
                }
                Ok(Resolution::Candidates(candidates))
            }
        }
    }

    /// Fetch names for every id in parallel, dropping ids that fail.
    async fn load_candidates(&self, ids: &[u64]) -> Vec<SearchCandidate> {
        let fetches = ids.iter().map(|&species_id| async move {
            match self.client.get_species(species_id).await {
                Ok(species) => Some(SearchCandidate {
                    species_id,
                    scientific_name: text_or(species.scientific_name.as_deref(), NOT_AVAILABLE),
                    common_name: text_or(
                        present(species.common_name.as_deref())
                            .or(present(species.vernacular_name.as_deref())),
                        NOT_AVAILABLE,
                    ),
                }),
                Err(e) => {
                    warn!(species_id, error = %e, "Dropping search candidate");
                    None
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
