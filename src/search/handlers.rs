use super::service::RecipeService;
use super::types::{
    ErrorResponse, QueryValidationResponse, SearchError, SearchRequest, SearchResponse,
    ValidateParams,
};
use crate::catalog::{DropdownOptions, Recipe};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const ENDPOINT_DROPDOWN_OPTIONS: &str = "/api/recipe/dropdown-options";
pub const ENDPOINT_SEARCH: &str = "/api/recipe/search";
pub const ENDPOINT_VALIDATE: &str = "/api/recipe/validate";
pub const ENDPOINT_RECIPE: &str = "/api/recipe/:id";

type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Builds the HTTP router with CORS restricted to `allowed_origins`.
pub fn router(service: Arc<RecipeService>, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(ENDPOINT_DROPDOWN_OPTIONS, get(handle_dropdown_options))
        .route(ENDPOINT_SEARCH, post(handle_search))
        .route(ENDPOINT_VALIDATE, get(handle_validate))
        .route(ENDPOINT_RECIPE, get(handle_get_recipe))
        .layer(Extension(service))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn handle_dropdown_options(
    Extension(service): Extension<Arc<RecipeService>>,
) -> (StatusCode, Json<DropdownOptions>) {
    (StatusCode::OK, Json(service.dropdown_options().await))
}

pub async fn handle_search(
    Extension(service): Extension<Arc<RecipeService>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SearchResponse>), ErrorReply> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!("Unreadable search body: {}", rejection.body_text());
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_details(
                    "Query is required",
                    rejection.body_text(),
                )),
            ));
        }
    };

    let query = match req.query {
        Some(query) if !query.trim().is_empty() => query,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Query is required")),
            ));
        }
    };

    match service.search_recipes(&query).await {
        Ok(response) => Ok((StatusCode::OK, Json(response))),
        Err(SearchError::InvalidQuery(message)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Invalid query syntax", message)),
        )),
        Err(e) => {
            tracing::error!("Search for {:?} failed: {}", query, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details("Search failed", e.to_string())),
            ))
        }
    }
}

pub async fn handle_validate(
    Extension(service): Extension<Arc<RecipeService>>,
    Query(params): Query<ValidateParams>,
) -> Result<(StatusCode, Json<QueryValidationResponse>), ErrorReply> {
    match params.query {
        Some(query) if !query.trim().is_empty() => {
            Ok((StatusCode::OK, Json(service.validate_query(&query))))
        }
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Query parameter is required")),
        )),
    }
}

pub async fn handle_get_recipe(
    Extension(service): Extension<Arc<RecipeService>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Recipe>), ErrorReply> {
    match service.recipe_by_id(&id).await {
        Ok(Some(recipe)) => Ok((StatusCode::OK, Json(recipe))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Recipe with ID {} not found", id))),
        )),
        Err(e) => {
            tracing::error!("Failed to fetch recipe {}: {}", id, e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::with_details("Failed to fetch recipe", e.to_string())),
            ))
        }
    }
}
