//! Recipe Catalog Module
//!
//! The boundary between the query compiler and the external recipe data provider.
//!
//! ## Overview
//! - **`source`**: the `TermSource` capability (four facet lookups) consumed by the search
//!   aggregator, and the wider `RecipeCatalog` used by the service for lists and lookups.
//! - **`client`**: `MealDbClient`, the HTTP adapter for TheMealDB's JSON API. It owns the
//!   timeout and retry policy for every upstream call.
//! - **`types`**: the typed `Recipe` record and the upstream wire format it is built from.
//!
//! Not-found is always an empty result. Only network, status and decoding faults are errors.

pub mod client;
pub mod source;
pub mod types;

pub use client::MealDbClient;
pub use source::{CatalogError, RecipeCatalog, TermSource};
pub use types::{DropdownOptions, Facet, Recipe};

#[cfg(test)]
mod tests;
