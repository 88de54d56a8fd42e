//! Recipe Service
//!
//! The surface the HTTP layer calls into. Validation, breakdown and SQL rendering are
//! pure and always available; only the term search and catalog lookups reach the
//! network.

use super::engine;
use super::types::{QueryValidationResponse, SearchError, SearchResponse};
use crate::catalog::{CatalogError, DropdownOptions, Recipe, RecipeCatalog};
use crate::config::SearchConfig;
use crate::query::{decompose, to_sql, validate};

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Entries per list in the dropdown options.
pub const DROPDOWN_LIMIT: usize = 5;

pub struct RecipeService {
    catalog: Arc<dyn RecipeCatalog>,
    limits: SearchConfig,
}

impl RecipeService {
    pub fn new(catalog: Arc<dyn RecipeCatalog>, limits: SearchConfig) -> Arc<Self> {
        Arc::new(Self { catalog, limits })
    }

    pub fn validate_query(&self, query: &str) -> QueryValidationResponse {
        let result = validate(query);
        let breakdown = if result.is_valid {
            decompose(&result.normalized_query)
        } else {
            None
        };

        QueryValidationResponse {
            query: query.to_string(),
            is_valid: result.is_valid,
            error_message: result.error_message(),
            breakdown,
        }
    }

    pub async fn search_recipes(&self, query: &str) -> Result<SearchResponse, SearchError> {
        self.search_recipes_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// Validates, then searches the catalog and renders the breakdown and SQL for the
    /// normalized query. Fails with [`SearchError::InvalidQuery`] before any lookup
    /// when validation fails.
    pub async fn search_recipes_with_cancel(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse, SearchError> {
        let validation = validate(query);
        if !validation.is_valid {
            let message = validation.error_message().unwrap_or_default();
            tracing::debug!("Search rejected: {}", message);
            return Err(SearchError::InvalidQuery(message));
        }
        let normalized = validation.normalized_query;

        let started = Instant::now();
        let outcome =
            engine::search_with_cancel(&normalized, self.catalog.as_ref(), &self.limits, cancel)
                .await?;
        let elapsed = started.elapsed();

        let cancelled = outcome.is_cancelled();
        let results = outcome.into_recipes();

        tracing::info!(
            "Search {:?} returned {} recipes in {}ms{}",
            normalized,
            results.len(),
            elapsed.as_millis(),
            if cancelled { " (cancelled)" } else { "" }
        );

        Ok(SearchResponse {
            query: query.to_string(),
            result_count: results.len(),
            results,
            breakdown: decompose(&normalized),
            execution_time: format!("{}ms", elapsed.as_millis()),
            generated_sql: to_sql(&normalized),
            cancelled,
        })
    }

    /// First few categories, areas and ingredients. A failing list is left empty.
    pub async fn dropdown_options(&self) -> DropdownOptions {
        let (categories, areas, ingredients) = tokio::join!(
            self.catalog.categories(),
            self.catalog.areas(),
            self.catalog.ingredients()
        );

        DropdownOptions {
            categories: first_or_empty("categories", categories),
            areas: first_or_empty("areas", areas),
            ingredients: first_or_empty("ingredients", ingredients),
        }
    }

    pub async fn recipe_by_id(&self, id: &str) -> Result<Option<Recipe>, SearchError> {
        Ok(self.catalog.recipe_by_id(id).await?)
    }
}

fn first_or_empty(list: &str, result: Result<Vec<String>, CatalogError>) -> Vec<String> {
    match result {
        Ok(values) => values.into_iter().take(DROPDOWN_LIMIT).collect(),
        Err(err) => {
            tracing::warn!("Upstream unavailable for {} list: {}", list, err);
            Vec::new()
        }
    }
}
