//! The unified species record shown on the detail screen
//!
//! Built in one step from the primary species payload and its dependent
//! sub-records. Every field has a fallback, so a record is always complete
//! even when the catalog omits data or a dependent fetch failed.

use crate::dimensions::{self, dimension_value};
use semantyfish_api::{CommonName, FamilyPayload, GenusPayload, RankPayload, SpeciesPayload};
use serde::Serialize;
use std::fmt;

pub use crate::dimensions::NOT_AVAILABLE;
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_TAXONOMIC_ISSUE: &str = "None";

/// Dependent fetches made after the primary species fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubRecord {
    Genus,
    Family,
    CommonNames,
    Order,
    Class,
}

impl fmt::Display for SubRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Genus => "genus",
            Self::Family => "family",
            Self::CommonNames => "common names",
            Self::Order => "order",
            Self::Class => "class",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: u64,
    pub species_code: u64,
    pub scientific_name: String,
    pub common_name: String,
    pub vernacular_name: String,
    pub scientific_author: String,
    pub genus: String,
    pub genus_code: u64,
    pub family: String,
    pub family_code: u64,
    pub subfamily: String,
    pub taxonomic_issue: String,
    pub taxonomic_remarks: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    pub saltwater: bool,
    pub freshwater: bool,
    pub brackish: bool,
    pub preferred_environment: String,
    pub body_shape: String,
    pub dangerous_species: String,
    pub electrogenic: String,
    pub air_breathing: String,
    pub migration_type: String,
}

/// Rendered size, depth, weight and age dimensions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimensions {
    pub max_length: String,
    pub min_depth: String,
    pub max_depth: String,
    pub common_shallow: String,
    pub common_deep: String,
    pub max_weight: String,
    pub max_age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conservation {
    pub fishing_vulnerability: String,
    pub fishing_vulnerability_value: f64,
    pub climate_vulnerability: String,
    pub climate_vulnerability_value: f64,
    pub phylogenetic_diversity: f64,
    pub emblematic_species: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commercial {
    pub fisheries_importance: String,
    pub importance_remarks: String,
    pub used_as_bait: String,
    pub aquaculture_status: String,
    pub game_fish: bool,
    pub catching_method: String,
    pub other_catching_methods: Vec<String>,
    pub landings_statistics: String,
    pub landings_areas: String,
    pub price_category: String,
    pub price_reliability: String,
    pub aquarium_demand: String,
    pub aquarium_details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesRecord {
    pub identity: Identity,
    pub environment: Environment,
    pub dimensions: Dimensions,
    pub conservation: Conservation,
    pub commercial: Commercial,
    pub description: String,
    pub genus_details: GenusPayload,
    pub family_details: FamilyPayload,
    pub order_details: RankPayload,
    pub class_details: RankPayload,
    pub common_names: Vec<CommonName>,
    /// Dependent fetches that failed and were replaced by empty defaults
    pub unavailable: Vec<SubRecord>,
}

/// Everything the aggregator fetched for one species
#[derive(Debug, Clone, Default)]
pub struct RecordParts {
    pub species: SpeciesPayload,
    pub genus: GenusPayload,
    pub family: FamilyPayload,
    pub order: RankPayload,
    pub class: RankPayload,
    pub common_names: Vec<CommonName>,
    pub unavailable: Vec<SubRecord>,
}

/// Present, non-empty text
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

pub(crate) fn text_or(value: Option<&str>, fallback: &str) -> String {
    present(value).unwrap_or(fallback).to_string()
}

fn na(value: Option<&str>) -> String {
    text_or(value, NOT_AVAILABLE)
}

fn num(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

fn author(species: &SpeciesPayload) -> String {
    let Some(assignment) = species.scientific_name_assignment.as_ref() else {
        return NOT_AVAILABLE.to_string();
    };

    match (
        present(assignment.assigned_by.as_deref()),
        present(assignment.at_year.as_deref()),
    ) {
        (Some(by), Some(year)) => format!("{} ({})", by, year),
        (Some(by), None) => by.to_string(),
        (None, Some(year)) => format!("({})", year),
        (None, None) => NOT_AVAILABLE.to_string(),
    }
}

impl SpeciesRecord {
    /// Assemble a record for `species_id` from fetched parts.
    ///
    /// `fallback_name` stands in for the common name when the catalog has
    /// neither a vernacular nor a common name.
    pub fn assemble(species_id: u64, fallback_name: Option<&str>, parts: RecordParts) -> Self {
        let RecordParts {
            species: data,
            genus,
            family,
            order,
            class,
            common_names,
            unavailable,
        } = parts;

        let dims = data.dimensions.as_deref().unwrap_or_default();
        let genus_ref = data.genus.clone().unwrap_or_default();
        let family_ref = data.family.clone().unwrap_or_default();
        let issue = data.taxonomic_issue.clone().unwrap_or_default();
        let fishing = data.vulnerability_fishing.clone().unwrap_or_default();
        let climate = data.vulnerability_climate.clone().unwrap_or_default();
        let importance = data.importance.clone().unwrap_or_default();
        let catching = data.catching_method.clone().unwrap_or_default();
        let landings = data.landings.clone().unwrap_or_default();
        let price = data.price_category.clone().unwrap_or_default();
        let aquarium = data.aquarium_demand.clone().unwrap_or_default();

        let common_name = present(data.vernacular_name.as_deref())
            .or(present(data.common_name.as_deref()))
            .or(present(fallback_name))
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        let identity = Identity {
            id: data.id.filter(|id| *id > 0).unwrap_or(species_id),
            species_code: species_id,
            scientific_name: na(data.scientific_name.as_deref()),
            vernacular_name: common_name.clone(),
            common_name,
            scientific_author: author(&data),
            genus: na(genus_ref.genus_name.as_deref()),
            genus_code: genus_ref.genus_code.unwrap_or(0),
            family: na(family_ref.family_name.as_deref()),
            family_code: family_ref.family_code.unwrap_or(0),
            subfamily: na(data.subfamily.as_deref()),
            taxonomic_issue: text_or(issue.issue.as_deref(), NO_TAXONOMIC_ISSUE),
            taxonomic_remarks: na(issue.remarks.as_deref()),
            source: na(data.source.as_deref()),
        };

        let environment = Environment {
            saltwater: data.salt_water_environment.unwrap_or(false),
            freshwater: data.freshwater_environment.unwrap_or(false),
            brackish: data.brackish_water_environment.unwrap_or(false),
            preferred_environment: na(data.preferred_environment.as_deref()),
            body_shape: na(data.body_shape.as_deref()),
            dangerous_species: na(data.dangerous_species_indicator.as_deref()),
            electrogenic: na(data.electrogenic.as_deref()),
            air_breathing: na(data.air_breathing_status.as_deref()),
            migration_type: na(data.migration_type.as_deref()),
        };

        let dimensions = Dimensions {
            max_length: dimension_value(dims, dimensions::MAX_LENGTH),
            min_depth: dimension_value(dims, dimensions::MOST_SHALLOW),
            max_depth: dimension_value(dims, dimensions::MOST_DEEP),
            common_shallow: dimension_value(dims, dimensions::COMMON_SHALLOW),
            common_deep: dimension_value(dims, dimensions::COMMON_DEEP),
            max_weight: dimension_value(dims, dimensions::MAX_WEIGHT),
            max_age: dimension_value(dims, dimensions::LONGEVITY_WILD),
        };

        let conservation = Conservation {
            fishing_vulnerability: na(fishing.index.as_deref()),
            fishing_vulnerability_value: num(fishing.value),
            climate_vulnerability: na(climate.index.as_deref()),
            climate_vulnerability_value: num(climate.value),
            phylogenetic_diversity: num(data.phylogenetic_diversity_index),
            emblematic_species: data.emblematic_species.unwrap_or(false),
        };

        let commercial = Commercial {
            fisheries_importance: na(importance.importance.as_deref()),
            importance_remarks: na(importance.remarks.as_deref()),
            used_as_bait: na(data.used_as_bait.as_deref()),
            aquaculture_status: na(data.used_for_aquaculture.as_deref()),
            game_fish: data.world_record_game_fishes.unwrap_or(false),
            catching_method: na(catching.main_method_using_fao_name.as_deref()),
            other_catching_methods: catching.other_methods.unwrap_or_default(),
            landings_statistics: na(landings.statistics.as_deref()),
            landings_areas: na(landings.areas.as_deref()),
            price_category: na(price.value.as_deref()),
            price_reliability: na(price.price_reliability.as_deref()),
            aquarium_demand: na(aquarium.value.as_deref()),
            aquarium_details: na(aquarium.details.as_deref()),
        };

        Self {
            identity,
            environment,
            dimensions,
            conservation,
            commercial,
            description: text_or(data.comments.as_deref(), NO_DESCRIPTION),
            genus_details: genus,
            family_details: family,
            order_details: order,
            class_details: class,
            common_names,
            unavailable,
        }
    }
}
