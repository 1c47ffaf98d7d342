//! Featured species shown on the search screen before any query

use crate::dimensions::{dimension_value, MOST_DEEP};
use crate::record::{present, text_or, NOT_AVAILABLE};
use futures::future::join_all;
use semantyfish_api::{CatalogClient, RankPayload};
use serde::Serialize;
use std::future::Future;
use tracing::{info, warn};

const PHOTO_BASE_URL: &str = "https://placehold.co/150x120/1a568b/ffffff";

/// A species id to feature, with a display name used when the catalog has
/// no common name and as the photo placeholder text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedEntry {
    pub id: u64,
    pub placeholder: &'static str,
}

pub const FEATURED_ENTRIES: &[FeaturedEntry] = &[
    FeaturedEntry { id: 1051, placeholder: "Clownfish" },
    FeaturedEntry { id: 143, placeholder: "Tuna" },
    FeaturedEntry { id: 4082, placeholder: "Shark" },
    FeaturedEntry { id: 137, placeholder: "Reef Fish" },
    FeaturedEntry { id: 5849, placeholder: "Grouper" },
    FeaturedEntry { id: 137, placeholder: "Mackerel" },
];

/// Summary card for one featured species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedSpecies {
    pub id: u64,
    pub scientific_name: String,
    pub common_name: String,
    pub photo_url: String,
    pub class: String,
    pub order: String,
    pub family: String,
    pub max_depth: String,
    pub environment: String,
}

pub fn photo_url(placeholder: &str) -> String {
    format!("{}?text={}", PHOTO_BASE_URL, placeholder.replace(' ', "+"))
}

/// Load cards for `entries`, in order. Entries whose species fetch fails are
/// left out.
pub async fn load_featured(client: &CatalogClient, entries: &[FeaturedEntry]) -> Vec<FeaturedSpecies> {
    let cards: Vec<FeaturedSpecies> = join_all(entries.iter().map(|entry| load_card(client, entry)))
        .await
        .into_iter()
        .flatten()
        .collect();

    info!(
        requested = entries.len(),
        loaded = cards.len(),
        "Loaded featured species"
    );
    cards
}

async fn load_card(client: &CatalogClient, entry: &FeaturedEntry) -> Option<FeaturedSpecies> {
    let species = match client.get_species(entry.id).await {
        Ok(species) => species,
        Err(e) => {
            warn!(species_id = entry.id, error = %e, "Skipping featured species");
            return None;
        }
    };

    let family = match species.family_code() {
        Some(code) => client.get_family(code).await.unwrap_or_else(|e| {
            warn!(species_id = entry.id, error = %e, "Featured family fetch failed");
            Default::default()
        }),
        None => Default::default(),
    };
    let class = rank_name(entry.id, family.class_code().map(|code| client.get_class(code))).await;
    let order = rank_name(entry.id, family.order_code().map(|code| client.get_order(code))).await;

    let common_name = text_or(
        present(species.common_name.as_deref()).or(present(species.vernacular_name.as_deref())),
        entry.placeholder,
    );

    Some(FeaturedSpecies {
        id: entry.id,
        scientific_name: text_or(species.scientific_name.as_deref(), NOT_AVAILABLE),
        common_name,
        photo_url: photo_url(entry.placeholder),
        class,
        order,
        family: text_or(
            species.family.as_ref().and_then(|f| f.family_name.as_deref()),
            NOT_AVAILABLE,
        ),
        max_depth: dimension_value(species.dimensions.as_deref().unwrap_or_default(), MOST_DEEP),
        environment: text_or(species.preferred_environment.as_deref(), NOT_AVAILABLE),
    })
}

async fn rank_name<F>(species_id: u64, fetch: Option<F>) -> String
where
    F: Future<Output = semantyfish_api::Result<RankPayload>>,
{
    let Some(fetch) = fetch else {
        return NOT_AVAILABLE.to_string();
    };

    match fetch.await {
        Ok(rank) => text_or(rank.name.as_deref(), NOT_AVAILABLE),
        Err(e) => {
            warn!(species_id, error = %e, "Featured rank fetch failed");
            NOT_AVAILABLE.to_string()
        }
    }
}
