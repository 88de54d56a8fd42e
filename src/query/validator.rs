//! Lexical Validator
//!
//! A coarse gate, not a grammar: it counts parentheses and checks the trimmed query
//! against one pattern. Operator placement relative to parentheses is never verified.

use super::types::{QueryError, ValidationResult};
use regex::Regex;
use std::sync::LazyLock;

/// Runs of letters, underscores, whitespace and parentheses, optionally joined by
/// a whitespace-surrounded `AND`, `OR` or `NOT`.
const GRAMMAR: &str = r"(?i)^[a-zA-Z_\s\(\)]+(?:\s+(AND|OR|NOT)\s+[a-zA-Z_\s\(\)]+)*$";

static GRAMMAR_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(GRAMMAR));

/// Validates a raw query. Never fails: every problem is reported in the result.
pub fn validate(query: &str) -> ValidationResult {
    match check(query) {
        Ok(normalized) => ValidationResult::valid(normalized),
        Err(err) => {
            tracing::debug!("Rejected query {:?}: {}", query, err);
            ValidationResult::invalid(err)
        }
    }
}

fn check(query: &str) -> Result<String, QueryError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    // Counts only; ")(" is balanced.
    let open = query.chars().filter(|&c| c == '(').count();
    let close = query.chars().filter(|&c| c == ')').count();
    if open != close {
        return Err(QueryError::UnbalancedParentheses);
    }

    let grammar = GRAMMAR_RE
        .as_ref()
        .map_err(|err| QueryError::ParseError(err.to_string()))?;

    if !grammar.is_match(trimmed) {
        return Err(QueryError::InvalidSyntax);
    }

    Ok(trimmed.to_string())
}
