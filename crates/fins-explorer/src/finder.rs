//! Search pipeline: resolve a query, then aggregate the resolved species

use crate::aggregator::Aggregator;
use crate::error::Result;
use crate::record::SpeciesRecord;
use crate::resolver::{Resolution, Resolver, SearchCandidate};
use semantyfish_api::CatalogClient;

/// What a search produced for the user
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Record(Box<SpeciesRecord>),
    /// Several matches; open one with [`SpeciesFinder::open`]
    Candidates(Vec<SearchCandidate>),
}

#[derive(Clone)]
pub struct SpeciesFinder {
    resolver: Resolver,
    aggregator: Aggregator,
}

impl SpeciesFinder {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            resolver: Resolver::new(client.clone()),
            aggregator: Aggregator::new(client),
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        match self.resolver.resolve(query).await? {
            Resolution::Resolved {
                species_id,
                fallback_name,
            } => {
                let record = self.open(species_id, fallback_name.as_deref()).await?;
                Ok(SearchOutcome::Record(Box::new(record)))
            }
            Resolution::Candidates(candidates) => Ok(SearchOutcome::Candidates(candidates)),
        }
    }

    pub async fn open(&self, species_id: u64, fallback_name: Option<&str>) -> Result<SpeciesRecord> {
        self.aggregator.aggregate(species_id, fallback_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;
    use crate::testing::FakeCatalog;
    use serde_json::json;

    #[tokio::test]
    async fn test_name_search_opens_single_match() {
        let catalog = FakeCatalog::new()
            .search("genus", "Amphiprion", json!([1051]))
            .species(1051, json!({"scientific_name": "Amphiprion ocellaris"}))
            .spawn()
            .await;
        let finder = SpeciesFinder::new(catalog.client());

        let SearchOutcome::Record(record) = finder.search("amphiprion").await.unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(record.identity.id, 1051);
        assert_eq!(record.identity.scientific_name, "Amphiprion ocellaris");
        // no catalog common name, so the query stands in
        assert_eq!(record.identity.common_name, "amphiprion");
    }

    #[tokio::test]
    async fn test_numeric_search_failure_names_the_id() {
        let catalog = FakeCatalog::new().spawn().await;
        let finder = SpeciesFinder::new(catalog.client());

        let err = finder.search("143").await.unwrap_err();
        assert!(matches!(err, ExplorerError::DetailsUnavailable { .. }));
        assert_eq!(
            err.to_string(),
            "Could not fetch details for species id 143. Status: 404"
        );
        assert_eq!(catalog.hits_prefix("search_species"), 0);
    }

    #[tokio::test]
    async fn test_repeated_search_is_idempotent() {
        let catalog = FakeCatalog::new()
            .species(143, json!({"scientific_name": "Thunnus albacares", "family": {"family_code": 416}}))
            .resource("family/416", json!({"class": {"class_code": 12}}))
            .resource("class/12", json!({"name": "Teleostei"}))
            .resource("common_name/143", json!({"results": ["Ahi"]}))
            .spawn()
            .await;
        let finder = SpeciesFinder::new(catalog.client());

        let first = finder.search("143").await.unwrap();
        let second = finder.search("143").await.unwrap();
        assert_eq!(first, second);
    }
}
