//! Detail aggregation: one species id in, one complete record out
//!
//! Fetch rounds run strictly in sequence because each reads codes produced
//! by the one before; fetches within a round run concurrently:
//!
//! 1. species
//! 2. genus, family, common names
//! 3. order, class (codes come from the family payload)

use crate::error::{ExplorerError, Result};
use crate::record::{RecordParts, SpeciesRecord, SubRecord};
use semantyfish_api::CatalogClient;
use std::future::Future;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct Aggregator {
    client: CatalogClient,
}

impl Aggregator {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Build the record for `species_id`.
    ///
    /// Only the primary species fetch can fail the call; dependent fetches
    /// that fail are replaced by empty defaults and listed in
    /// `SpeciesRecord::unavailable`.
    pub async fn aggregate(
        &self,
        species_id: u64,
        fallback_name: Option<&str>,
    ) -> Result<SpeciesRecord> {
        let species = self
            .client
            .get_species(species_id)
            .await
            .map_err(|source| ExplorerError::DetailsUnavailable { species_id, source })?;

        let genus_code = species.genus_code();
        let family_code = species.family_code();

        let ((genus, genus_failed), (family, family_failed), (common_names, names_failed)) = tokio::join!(
            sub_fetch(
                SubRecord::Genus,
                species_id,
                genus_code.map(|code| self.client.get_genus(code)),
            ),
            sub_fetch(
                SubRecord::Family,
                species_id,
                family_code.map(|code| self.client.get_family(code)),
            ),
            sub_fetch(
                SubRecord::CommonNames,
                species_id,
                Some(self.client.get_common_names(species_id)),
            ),
        );

        let order_code = family.order_code();
        let class_code = family.class_code();

        let ((order, order_failed), (class, class_failed)) = tokio::join!(
            sub_fetch(
                SubRecord::Order,
                species_id,
                order_code.map(|code| self.client.get_order(code)),
            ),
            sub_fetch(
                SubRecord::Class,
                species_id,
                class_code.map(|code| self.client.get_class(code)),
            ),
        );

        let unavailable = [
            genus_failed,
            family_failed,
            names_failed,
            order_failed,
            class_failed,
        ]
        .into_iter()
        .flatten()
        .collect();

        let record = SpeciesRecord::assemble(
            species_id,
            fallback_name,
            RecordParts {
                species,
                genus,
                family,
                order,
                class,
                common_names,
                unavailable,
            },
        );

        info!(
            species_id,
            scientific_name = %record.identity.scientific_name,
            unavailable = record.unavailable.len(),
            "Assembled species record"
        );
        Ok(record)
    }
}

/// Run a dependent fetch, absorbing failure into the empty default.
///
/// `None` means there was no code to fetch by; that is not a failure.
async fn sub_fetch<T, F>(kind: SubRecord, species_id: u64, fetch: Option<F>) -> (T, Option<SubRecord>)
where
    T: Default,
    F: Future<Output = semantyfish_api::Result<T>>,
{
    let Some(fetch) = fetch else {
        debug!(species_id, sub_record = %kind, "No code, skipping fetch");
        return (T::default(), None);
    };

    match fetch.await {
        Ok(value) => (value, None),
        Err(e) => {
            warn!(
                species_id,
                sub_record = %kind,
                error = %e,
                "Sub-record fetch failed, using empty default"
            );
            (T::default(), Some(kind))
        }
    }
}
