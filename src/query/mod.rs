//! Boolean Query Compiler
//!
//! Turns a raw recipe query such as `chicken AND (italian OR NOT dessert)` into
//! everything the rest of the service needs, without performing any I/O.
//!
//! ## Pipeline
//! 1. **Validation** (`validator`): empty check, parenthesis count, and a single
//!    lexical grammar pattern. Failures are returned as values.
//! 2. **Decomposition** (`decomposer`): a flat breakdown of terms, operators and flags.
//!    Terms and operators come from two independent scans and are not positionally related.
//! 3. **Translation** (`translator`): ordered vocabulary substitution into a SQL `WHERE`
//!    clause spliced into a fixed `SELECT` template.
//! 4. **Term extraction** (`tokenizer`): plain search terms for the term-based catalog.
//!
//! Every stage re-derives what it needs from the query text; none depends on another's output.

pub mod decomposer;
pub mod tokenizer;
pub mod translator;
pub mod types;
pub mod validator;

pub use decomposer::decompose;
pub use tokenizer::extract_search_terms;
pub use translator::to_sql;
pub use types::{QueryBreakdown, QueryError, ValidationResult};
pub use validator::validate;
