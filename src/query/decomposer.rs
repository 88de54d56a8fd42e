//! Structural Decomposer
//!
//! Produces the flat [`QueryBreakdown`]. Two scans run over the same text:
//! one collects operators and parentheses in order, the other strips them and
//! keeps whatever words remain.

use super::types::{BOOLEAN_QUERY_TYPE, QueryBreakdown};
use regex::Regex;
use std::sync::LazyLock;

static OPERATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(AND|OR|NOT)\b|\(|\)").unwrap());

static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(AND|OR|NOT)\b").unwrap());

static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()]").unwrap());

/// Breaks a query down into terms, operators and flags.
///
/// Returns `None` for empty or whitespace-only input.
pub fn decompose(query: &str) -> Option<QueryBreakdown> {
    if query.trim().is_empty() {
        return None;
    }

    Some(QueryBreakdown {
        query_type: BOOLEAN_QUERY_TYPE.to_string(),
        query: query.to_string(),
        terms: scan_terms(query),
        operators: scan_operators(query),
        has_parentheses: query.contains('(') || query.contains(')'),
        // Case-sensitive substring, not word-bounded: "NOTHING" counts.
        has_not: query.contains("NOT"),
    })
}

fn scan_operators(query: &str) -> Vec<String> {
    OPERATOR_RE
        .find_iter(query)
        .map(|m| m.as_str().to_uppercase())
        .collect()
}

fn scan_terms(query: &str) -> Vec<String> {
    let without_keywords = KEYWORD_RE.replace_all(query, " ");
    let without_parens = PAREN_RE.replace_all(&without_keywords, " ");

    without_parens
        .split_whitespace()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}
