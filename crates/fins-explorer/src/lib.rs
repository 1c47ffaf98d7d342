//! FINS species explorer
//!
//! Resolves free-text or numeric queries against the SemantyFish catalog,
//! aggregates the matching species and its taxonomy into one
//! [`SpeciesRecord`], and drives the landing → intro → search → detail
//! screens of the terminal front-end.

pub mod aggregator;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod featured;
pub mod finder;
pub mod query;
pub mod record;
pub mod render;
pub mod resolver;
pub mod session;
pub mod view;

#[cfg(test)]
mod testing;

pub use aggregator::Aggregator;
pub use config::ExplorerConfig;
pub use error::{ExplorerError, Result};
pub use featured::{load_featured, FeaturedEntry, FeaturedSpecies, FEATURED_ENTRIES};
pub use finder::{SearchOutcome, SpeciesFinder};
pub use record::{SpeciesRecord, SubRecord};
pub use render::DetailTab;
pub use resolver::{Resolution, Resolver, SearchCandidate};
pub use session::Session;
pub use view::{RequestToken, ViewController, ViewEvent, ViewState};
