//! Recipe Search Module
//!
//! Bridges the query compiler and the recipe catalog, and exposes both over HTTP.
//!
//! ## Responsibilities
//! - **Aggregation**: fanning search terms out to the catalog facets and merging the
//!   answers deterministically.
//! - **Service**: validation, search, dropdown options and recipe lookup as one API.
//! - **API**: Axum handlers and the router.
//!
//! ## Submodules
//! - **`engine`**: the term-search aggregator.
//! - **`service`**: `RecipeService`, the entry point used by handlers.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: request/response DTOs and `SearchError`.

pub mod engine;
pub mod handlers;
pub mod service;
pub mod types;

pub use engine::{SearchOutcome, search, search_with_cancel};
pub use service::RecipeService;
pub use types::{SearchError, SearchResponse};
