//! Rust client for the SemantyFish marine species catalog API
//!
//! This crate provides type-safe bindings to the read-only resources of the
//! catalog: species, taxonomic ranks and common names.
//!
//! # Example
//!
//! ```no_run
//! use semantyfish_api::CatalogClient;
//!
//! # async fn example() -> Result<(), semantyfish_api::CatalogError> {
//! let client = CatalogClient::new("http://localhost:3001/api");
//!
//! // Resolve a name to species ids
//! let ids = client.search_by_scientific_name("Thunnus albacares").await?;
//!
//! // Fetch the full species payload
//! if let Some(id) = ids.first() {
//!     let species = client.get_species(*id).await?;
//!     println!("{:?}", species.scientific_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET resources/species/{id}` - Species details
//! - `GET resources/search_species?scientific_name=` - Search by scientific name
//! - `GET resources/search_species?genus=` - Search by genus
//! - `GET resources/genus/{code}` - Genus details
//! - `GET resources/family/{code}` - Family details (carries order and class codes)
//! - `GET resources/order/{code}` - Order details
//! - `GET resources/class/{code}` - Class details
//! - `GET resources/common_name/{id}` - Common names of a species

mod client;
mod de;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use types::{
    AquariumDemand, CatchingMethod, ClassRef, CommonName, Dimension, FamilyPayload, FamilyRef,
    GenusPayload, GenusRef, Importance, Landings, OrderRef, PriceCategory, RankPayload,
    ScientificNameAssignment, SearchResponse, SpeciesPayload, TaxonomicIssue, Vulnerability,
};
