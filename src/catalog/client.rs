//! TheMealDB HTTP Adapter
//!
//! Implements the catalog traits over TheMealDB's public JSON API. Every call goes
//! through one retry loop with exponential backoff and jitter, bounded by a per-request
//! timeout.

use super::source::{CatalogError, RecipeCatalog, TermSource};
use super::types::{AreaEntry, CategoryEntry, IngredientEntry, Meal, MealDbResponse, Recipe};
use crate::config::CatalogConfig;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

const ENDPOINT_FILTER: &str = "filter.php";
const ENDPOINT_SEARCH: &str = "search.php";
const ENDPOINT_LOOKUP: &str = "lookup.php";
const ENDPOINT_LIST: &str = "list.php";

pub struct MealDbClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    attempts: usize,
}

impl MealDbClient {
    pub fn new(base_url: &str, timeout: Duration, attempts: usize) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            attempts: attempts.max(1),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            &config.base_url,
            Duration::from_millis(config.timeout_ms),
            config.retry_attempts,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GETs `url` with the query parameters URL-encoded, retrying transport
    /// failures and 5xx responses. Other statuses fail immediately.
    ///
    /// With a single attempt the failure is returned as is; otherwise the last
    /// failure is wrapped in [`CatalogError::RetriesExhausted`].
    async fn get_with_retry(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, CatalogError> {
        let mut delay_ms = 150u64;
        let mut attempt = 1;

        loop {
            let response = self
                .http_client
                .get(url)
                .query(params)
                .timeout(self.timeout)
                .send()
                .await;

            let failure = match response {
                Ok(resp) if resp.status().is_success() => {
                    return resp.text().await.map_err(|source| CatalogError::Http {
                        url: url.to_string(),
                        source,
                    });
                }
                Ok(resp) if resp.status().is_server_error() => CatalogError::Status {
                    url: url.to_string(),
                    status: resp.status().as_u16(),
                },
                Ok(resp) => {
                    return Err(CatalogError::Status {
                        url: url.to_string(),
                        status: resp.status().as_u16(),
                    });
                }
                Err(source) => CatalogError::Http {
                    url: url.to_string(),
                    source,
                },
            };

            if attempt >= self.attempts {
                if self.attempts == 1 {
                    return Err(failure);
                }
                return Err(CatalogError::RetriesExhausted {
                    url: url.to_string(),
                    attempts: self.attempts,
                    source: Box::new(failure),
                });
            }

            tracing::debug!("Attempt {} for {} failed, retrying: {}", attempt, url, failure);
            let jitter = rand::random::<u64>() % 50;
            tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
            delay_ms = (delay_ms * 2).min(1200);
            attempt += 1;
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, CatalogError> {
        let url = self.endpoint(path);
        let body = self.get_with_retry(&url, params).await?;
        decode_items(&url, &body)
    }

    async fn fetch_recipes(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<Vec<Recipe>, CatalogError> {
        let meals: Vec<Meal> = self.fetch(path, &[(key, value)]).await?;
        tracing::debug!("{}?{}={} returned {} meals", path, key, value, meals.len());
        Ok(meals.into_iter().map(Recipe::from_meal).collect())
    }
}

/// Decodes a TheMealDB envelope. A blank body or `"meals": null` is an empty list.
pub fn decode_items<T: DeserializeOwned>(url: &str, body: &str) -> Result<Vec<T>, CatalogError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<MealDbResponse<T>>(body)
        .map(MealDbResponse::into_items)
        .map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
}

fn non_blank(names: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    names
        .into_iter()
        .flatten()
        .filter(|name| !name.trim().is_empty())
        .collect()
}

#[async_trait]
impl TermSource for MealDbClient {
    async fn by_category(&self, name: &str) -> Result<Vec<Recipe>, CatalogError> {
        self.fetch_recipes(ENDPOINT_FILTER, "c", name).await
    }

    async fn by_area(&self, name: &str) -> Result<Vec<Recipe>, CatalogError> {
        self.fetch_recipes(ENDPOINT_FILTER, "a", name).await
    }

    async fn by_ingredient(&self, name: &str) -> Result<Vec<Recipe>, CatalogError> {
        self.fetch_recipes(ENDPOINT_FILTER, "i", name).await
    }

    async fn by_name(&self, text: &str) -> Result<Vec<Recipe>, CatalogError> {
        self.fetch_recipes(ENDPOINT_SEARCH, "s", text).await
    }
}

#[async_trait]
impl RecipeCatalog for MealDbClient {
    async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let entries: Vec<CategoryEntry> = self.fetch(ENDPOINT_LIST, &[("c", "list")]).await?;
        Ok(non_blank(entries.into_iter().map(|e| e.str_category)))
    }

    async fn areas(&self) -> Result<Vec<String>, CatalogError> {
        let entries: Vec<AreaEntry> = self.fetch(ENDPOINT_LIST, &[("a", "list")]).await?;
        Ok(non_blank(entries.into_iter().map(|e| e.str_area)))
    }

    async fn ingredients(&self) -> Result<Vec<String>, CatalogError> {
        let entries: Vec<IngredientEntry> = self.fetch(ENDPOINT_LIST, &[("i", "list")]).await?;
        Ok(non_blank(entries.into_iter().map(|e| e.str_ingredient)))
    }

    async fn recipe_by_id(&self, id: &str) -> Result<Option<Recipe>, CatalogError> {
        let meals: Vec<Meal> = self.fetch(ENDPOINT_LOOKUP, &[("i", id)]).await?;
        Ok(meals.into_iter().next().map(Recipe::from_meal))
    }
}
