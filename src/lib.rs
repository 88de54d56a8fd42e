//! Recipe Query Service Library
//!
//! This library crate defines the modules behind the recipe search binary (`main.rs`).
//!
//! ## Architecture Modules
//! - **`query`**: the boolean query compiler. Validation, structural breakdown, SQL
//!   rendering and search-term extraction, all pure.
//! - **`catalog`**: the recipe data provider boundary and its TheMealDB HTTP client.
//! - **`search`**: the term-search aggregator, `RecipeService`, and the HTTP API.
//! - **`config`**: runtime configuration from the environment and command line.

pub mod catalog;
pub mod config;
pub mod query;
pub mod search;
