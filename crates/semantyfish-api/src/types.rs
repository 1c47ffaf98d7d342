//! Data types for catalog API responses
//!
//! Every field is optional: the catalog omits whatever it does not know, and
//! callers decide on their own fallbacks. Sub-record payloads keep unknown
//! keys in `extra` so they can still be displayed.

use crate::de;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Species detail from `resources/species/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesPayload {
    #[serde(deserialize_with = "de::code")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::text")]
    pub scientific_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub common_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub vernacular_name: Option<String>,
    #[serde(deserialize_with = "de::nested")]
    pub scientific_name_assignment: Option<ScientificNameAssignment>,
    #[serde(deserialize_with = "de::nested")]
    pub genus: Option<GenusRef>,
    #[serde(deserialize_with = "de::nested")]
    pub family: Option<FamilyRef>,
    #[serde(deserialize_with = "de::text")]
    pub subfamily: Option<String>,
    #[serde(deserialize_with = "de::nested")]
    pub taxonomic_issue: Option<TaxonomicIssue>,
    #[serde(deserialize_with = "de::text")]
    pub source: Option<String>,

    #[serde(deserialize_with = "de::flag")]
    pub salt_water_environment: Option<bool>,
    #[serde(deserialize_with = "de::flag")]
    pub freshwater_environment: Option<bool>,
    #[serde(deserialize_with = "de::flag")]
    pub brackish_water_environment: Option<bool>,
    #[serde(deserialize_with = "de::text")]
    pub preferred_environment: Option<String>,

    #[serde(deserialize_with = "de::text")]
    pub body_shape: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub dangerous_species_indicator: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub electrogenic: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub air_breathing_status: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub migration_type: Option<String>,

    #[serde(deserialize_with = "de::nested_list")]
    pub dimensions: Option<Vec<Dimension>>,

    #[serde(deserialize_with = "de::nested")]
    pub vulnerability_fishing: Option<Vulnerability>,
    #[serde(deserialize_with = "de::nested")]
    pub vulnerability_climate: Option<Vulnerability>,
    #[serde(deserialize_with = "de::number")]
    pub phylogenetic_diversity_index: Option<f64>,
    #[serde(deserialize_with = "de::flag")]
    pub emblematic_species: Option<bool>,

    #[serde(deserialize_with = "de::nested")]
    pub importance: Option<Importance>,
    #[serde(deserialize_with = "de::text")]
    pub used_as_bait: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub used_for_aquaculture: Option<String>,
    #[serde(deserialize_with = "de::flag")]
    pub world_record_game_fishes: Option<bool>,

    #[serde(deserialize_with = "de::nested")]
    pub catching_method: Option<CatchingMethod>,
    #[serde(deserialize_with = "de::nested")]
    pub landings: Option<Landings>,
    #[serde(deserialize_with = "de::nested")]
    pub price_category: Option<PriceCategory>,
    #[serde(deserialize_with = "de::nested")]
    pub aquarium_demand: Option<AquariumDemand>,

    #[serde(deserialize_with = "de::text")]
    pub comments: Option<String>,
}

impl SpeciesPayload {
    /// Whether the payload names a species at all, by id or scientific name
    pub fn is_identified(&self) -> bool {
        let has_id = self.id.is_some_and(|id| id > 0);
        let has_name = self
            .scientific_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        has_id || has_name
    }

    /// Genus code carried by the nested genus reference; `0` means none
    pub fn genus_code(&self) -> Option<u64> {
        self.genus
            .as_ref()
            .and_then(|g| g.genus_code)
            .filter(|code| *code > 0)
    }

    /// Family code carried by the nested family reference; `0` means none
    pub fn family_code(&self) -> Option<u64> {
        self.family
            .as_ref()
            .and_then(|f| f.family_code)
            .filter(|code| *code > 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScientificNameAssignment {
    #[serde(deserialize_with = "de::text")]
    pub assigned_by: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub at_year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenusRef {
    #[serde(deserialize_with = "de::code")]
    pub genus_code: Option<u64>,
    #[serde(deserialize_with = "de::text")]
    pub genus_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyRef {
    #[serde(deserialize_with = "de::code")]
    pub family_code: Option<u64>,
    #[serde(deserialize_with = "de::text")]
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomicIssue {
    #[serde(deserialize_with = "de::text")]
    pub issue: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub remarks: Option<String>,
}

/// One entry of the unordered `dimensions` list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "de::text")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vulnerability {
    #[serde(deserialize_with = "de::text")]
    pub index: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Importance {
    #[serde(deserialize_with = "de::text")]
    pub importance: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchingMethod {
    #[serde(deserialize_with = "de::text")]
    pub main_method_using_fao_name: Option<String>,
    #[serde(deserialize_with = "de::text_list")]
    pub other_methods: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Landings {
    #[serde(deserialize_with = "de::text")]
    pub statistics: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub areas: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceCategory {
    #[serde(deserialize_with = "de::text")]
    pub value: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub price_reliability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AquariumDemand {
    #[serde(deserialize_with = "de::text")]
    pub value: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub details: Option<String>,
}

/// Genus detail from `resources/genus/{code}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenusPayload {
    #[serde(deserialize_with = "de::text")]
    pub diagnosis: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub etymology: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Family detail from `resources/family/{code}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyPayload {
    #[serde(deserialize_with = "de::text")]
    pub etymology: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub number_of_valid_species: Option<f64>,
    #[serde(deserialize_with = "de::nested")]
    pub order: Option<OrderRef>,
    #[serde(deserialize_with = "de::nested")]
    pub class: Option<ClassRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FamilyPayload {
    /// Order code carried by the nested order reference
    pub fn order_code(&self) -> Option<u64> {
        self.order
            .as_ref()
            .and_then(|o| o.order_code)
            .filter(|code| *code > 0)
    }

    /// Class code carried by the nested class reference
    pub fn class_code(&self) -> Option<u64> {
        self.class
            .as_ref()
            .and_then(|c| c.class_code)
            .filter(|code| *code > 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRef {
    #[serde(deserialize_with = "de::code")]
    pub order_code: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassRef {
    #[serde(deserialize_with = "de::code")]
    pub class_code: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Order or class detail from `resources/order/{code}` and `resources/class/{code}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankPayload {
    #[serde(deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry from `resources/common_name/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonName {
    #[serde(deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub language: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope used by the search and common-name endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub results: Option<Vec<Value>>,
}
