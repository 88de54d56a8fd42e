//! Term-Search Aggregator
//!
//! Fans each search term out to the four catalog facets, then folds the answers back
//! in canonical order (term order, then category, area, ingredient, name) no matter
//! which lookup finished first. The merged list is deduplicated by recipe id, keeping
//! the first occurrence, and capped.
//!
//! A failing facet lookup is logged and contributes nothing; the search carries on.

use super::types::SearchError;
use crate::catalog::{Facet, Recipe, TermSource};
use crate::config::SearchConfig;
use crate::query::extract_search_terms;

use futures::StreamExt;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

/// Result of a search that may have been cancelled part-way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every term was looked up.
    Complete(Vec<Recipe>),
    /// Cancelled after some results were assembled; never a silent truncation.
    Cancelled(Vec<Recipe>),
}

impl SearchOutcome {
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            SearchOutcome::Complete(recipes) | SearchOutcome::Cancelled(recipes) => recipes,
        }
    }

    pub fn into_recipes(self) -> Vec<Recipe> {
        match self {
            SearchOutcome::Complete(recipes) | SearchOutcome::Cancelled(recipes) => recipes,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchOutcome::Cancelled(_))
    }
}

/// Order-preserving accumulator: first instance of each id wins, up to `limit`.
struct ResultMerger {
    seen: HashSet<String>,
    recipes: Vec<Recipe>,
    limit: usize,
}

impl ResultMerger {
    fn new(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            recipes: Vec::new(),
            limit,
        }
    }

    fn extend(&mut self, batch: Vec<Recipe>) {
        for recipe in batch {
            if self.recipes.len() >= self.limit {
                return;
            }
            if self.seen.insert(recipe.id.clone()) {
                self.recipes.push(recipe);
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn is_full(&self) -> bool {
        self.recipes.len() >= self.limit
    }

    fn finish(self) -> Vec<Recipe> {
        self.recipes
    }
}

/// Runs a term search to completion.
pub async fn search<S>(query: &str, source: &S, limits: &SearchConfig) -> Vec<Recipe>
where
    S: TermSource + ?Sized,
{
    match search_with_cancel(query, source, limits, &CancellationToken::new()).await {
        Ok(outcome) => outcome.into_recipes(),
        Err(_) => Vec::new(),
    }
}

/// Runs a term search that stops early when `cancel` fires.
///
/// Up to `limits.term_concurrency` terms are in flight at once, each with its four
/// facet lookups running concurrently. Once the cap is reached no further terms are
/// started. On cancellation, outstanding lookups are dropped and whatever was merged
/// so far is returned as [`SearchOutcome::Cancelled`], or [`SearchError::Cancelled`]
/// if nothing was.
pub async fn search_with_cancel<S>(
    query: &str,
    source: &S,
    limits: &SearchConfig,
    cancel: &CancellationToken,
) -> Result<SearchOutcome, SearchError>
where
    S: TermSource + ?Sized,
{
    let terms = extract_search_terms(query);
    tracing::debug!("Searching {} terms: {:?}", terms.len(), terms);

    let mut merger = ResultMerger::new(limits.max_results);
    if merger.is_full() {
        return Ok(SearchOutcome::Complete(merger.finish()));
    }

    // `buffered` yields in input order, so merging stays deterministic.
    let mut pending = std::pin::pin!(
        futures::stream::iter(terms)
            .map(|term| async move { fetch_term(source, &term).await })
            .buffered(limits.term_concurrency.max(1))
    );

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Search for {:?} cancelled", query);
                return if merger.is_empty() {
                    Err(SearchError::Cancelled)
                } else {
                    Ok(SearchOutcome::Cancelled(merger.finish()))
                };
            }
            batch = pending.next() => match batch {
                Some(batch) => {
                    merger.extend(batch);
                    // Terms not yet started are never looked up.
                    if merger.is_full() {
                        tracing::debug!("Result cap of {} reached", limits.max_results);
                        break;
                    }
                }
                None => break,
            },
        }
    }

    Ok(SearchOutcome::Complete(merger.finish()))
}

/// All four facets for one term, concatenated in canonical facet order.
async fn fetch_term<S>(source: &S, term: &str) -> Vec<Recipe>
where
    S: TermSource + ?Sized,
{
    let lookups = Facet::ALL.map(|facet| lookup_or_empty(source, facet, term));

    futures::future::join_all(lookups)
        .await
        .into_iter()
        .flatten()
        .collect()
}

async fn lookup_or_empty<S>(source: &S, facet: Facet, term: &str) -> Vec<Recipe>
where
    S: TermSource + ?Sized,
{
    match source.lookup(facet, term).await {
        Ok(recipes) => recipes,
        Err(err) => {
            tracing::warn!("{} lookup for {:?} failed, skipping: {}", facet, term, err);
            Vec::new()
        }
    }
}
