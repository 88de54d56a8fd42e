//! Catalog Capabilities
//!
//! Traits the search pipeline is written against, so it can run over the live HTTP
//! adapter or an in-memory double.

use super::types::{Facet, Recipe};
use async_trait::async_trait;
use thiserror::Error;

/// Faults talking to the recipe data provider.
///
/// "Nothing found" is never one of these; it is an empty result.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Every attempt failed with a retryable fault; `source` is the last one.
    #[error("{url} still failing after {attempts} attempts: {source}")]
    RetriesExhausted {
        url: String,
        attempts: usize,
        #[source]
        source: Box<CatalogError>,
    },
}

/// Term-based recipe lookups, one method per facet.
///
/// Each lookup fails independently of the others.
#[async_trait]
pub trait TermSource: Send + Sync {
    async fn by_category(&self, name: &str) -> Result<Vec<Recipe>, CatalogError>;

    async fn by_area(&self, name: &str) -> Result<Vec<Recipe>, CatalogError>;

    async fn by_ingredient(&self, name: &str) -> Result<Vec<Recipe>, CatalogError>;

    async fn by_name(&self, text: &str) -> Result<Vec<Recipe>, CatalogError>;

    /// Dispatches to the lookup for `facet`.
    async fn lookup(&self, facet: Facet, term: &str) -> Result<Vec<Recipe>, CatalogError> {
        match facet {
            Facet::Category => self.by_category(term).await,
            Facet::Area => self.by_area(term).await,
            Facet::Ingredient => self.by_ingredient(term).await,
            Facet::Name => self.by_name(term).await,
        }
    }
}

/// The full catalog: facet lookups plus value lists and lookup by id.
#[async_trait]
pub trait RecipeCatalog: TermSource {
    async fn categories(&self) -> Result<Vec<String>, CatalogError>;

    async fn areas(&self) -> Result<Vec<String>, CatalogError>;

    async fn ingredients(&self) -> Result<Vec<String>, CatalogError>;

    async fn recipe_by_id(&self, id: &str) -> Result<Option<Recipe>, CatalogError>;
}
