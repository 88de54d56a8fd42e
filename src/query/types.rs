//! Query Compiler Types
//!
//! Value objects produced by the validator and decomposer. They are created once per
//! call and never mutated afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constant tag carried by every breakdown.
pub const BOOLEAN_QUERY_TYPE: &str = "BooleanQuery";

/// Reasons a query can be rejected by the validator.
///
/// None of these escape the validator as a fault; they are carried inside
/// a [`ValidationResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("Invalid query syntax")]
    InvalidSyntax,

    /// An unexpected internal fault, wrapped with its description.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Outcome of validating a raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// The trimmed query on success, empty on failure.
    pub normalized_query: String,
    pub is_valid: bool,
    pub error: Option<QueryError>,
}

impl ValidationResult {
    pub fn valid(normalized_query: impl Into<String>) -> Self {
        Self {
            normalized_query: normalized_query.into(),
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: QueryError) -> Self {
        Self {
            normalized_query: String::new(),
            is_valid: false,
            error: Some(error),
        }
    }

    /// Human readable failure description, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Flat descriptive record of a query, historically called the "parse tree".
///
/// `terms` and `operators` are produced by separate scans of the same text, so
/// the i-th operator has no defined relationship to the i-th term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBreakdown {
    #[serde(rename = "type")]
    pub query_type: String,
    pub query: String,
    pub terms: Vec<String>,
    /// Upper-cased `AND`/`OR`/`NOT` and literal parentheses, in source order.
    pub operators: Vec<String>,
    pub has_parentheses: bool,
    pub has_not: bool,
}
