use crate::catalog::{CatalogError, Recipe};
use crate::query::QueryBreakdown;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The query failed validation. A client error, not a server fault.
    #[error("Invalid query syntax: {0}")]
    InvalidQuery(String),

    #[error("search cancelled before any results were assembled")]
    Cancelled,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    /// Deduplicated by id, capped.
    pub results: Vec<Recipe>,
    #[serde(rename = "parseTree")]
    pub breakdown: Option<QueryBreakdown>,
    pub execution_time: String,
    pub result_count: usize,
    pub generated_sql: String,
    /// Set when the search was cancelled and `results` is partial.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryValidationResponse {
    pub query: String,
    pub is_valid: bool,
    pub error_message: Option<String>,
    #[serde(rename = "parseTree")]
    pub breakdown: Option<QueryBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
