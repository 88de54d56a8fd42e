//! Catalog Module Tests
//!
//! ## Test Scopes
//! - **Conversion**: upstream meal records into `Recipe` values.
//! - **Decoding**: envelope handling, including TheMealDB's `null` for "no results".
//! - **Client**: the HTTP adapter against a local stub server (no external network).

#[cfg(test)]
mod tests {
    use crate::catalog::client::decode_items;
    use crate::catalog::types::{CategoryEntry, Meal, Recipe};
    use crate::catalog::{CatalogError, Facet, MealDbClient, RecipeCatalog, TermSource};
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn full_meal_json() -> serde_json::Value {
        serde_json::json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strInstructions": "Preheat oven to 350F.",
            "strTags": "Meat, Casserole ,,",
            "strIngredient1": "soy sauce",
            "strIngredient2": " water ",
            "strIngredient3": "",
            "strIngredient4": null,
            "strIngredient12": "chicken breasts",
            "strMeasure1": "3/4 cup"
        })
    }

    fn filter_meal_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "strMeal": name,
            "strMealThumb": format!("https://img.example/{}.jpg", id),
            "idMeal": id
        })
    }

    // ============================================================
    // CONVERSION TESTS - Recipe::from_meal
    // ============================================================

    #[test]
    fn test_from_meal_full_record() {
        let meal: Meal = serde_json::from_value(full_meal_json()).unwrap();
        let recipe = Recipe::from_meal(meal);

        assert_eq!(recipe.id, "52772");
        assert_eq!(recipe.name, "Teriyaki Chicken Casserole");
        assert_eq!(recipe.category, "Chicken");
        assert_eq!(recipe.area, "Japanese");
        assert_eq!(recipe.instructions, "Preheat oven to 350F.");
        assert!(recipe.thumbnail_url.ends_with(".jpg"));
    }

    #[test]
    fn test_from_meal_ingredients_in_slot_order() {
        let meal: Meal = serde_json::from_value(full_meal_json()).unwrap();
        let recipe = Recipe::from_meal(meal);

        // Blank and null slots are skipped, values trimmed, slots past 10 included
        assert_eq!(
            recipe.ingredients,
            vec!["soy sauce", "water", "chicken breasts"]
        );
    }

    #[test]
    fn test_from_meal_tags_lowercased_and_trimmed() {
        let meal: Meal = serde_json::from_value(full_meal_json()).unwrap();
        let recipe = Recipe::from_meal(meal);

        assert_eq!(recipe.tags, vec!["meat", "casserole"]);
    }

    #[test]
    fn test_from_meal_filter_record_defaults() {
        let meal: Meal = serde_json::from_value(filter_meal_json("1", "Stew")).unwrap();
        let recipe = Recipe::from_meal(meal);

        assert_eq!(recipe.id, "1");
        assert_eq!(recipe.name, "Stew");
        assert_eq!(recipe.category, "");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.tags.is_empty());
    }

    #[test]
    fn test_recipe_serialization_field_names() {
        let meal: Meal = serde_json::from_value(full_meal_json()).unwrap();
        let json = serde_json::to_value(Recipe::from_meal(meal)).unwrap();

        assert_eq!(json["id"], "52772");
        assert!(json.get("thumbnailUrl").is_some());
        assert_eq!(json["tags"], serde_json::json!(["meat", "casserole"]));
    }

    #[test]
    fn test_facet_canonical_order() {
        assert_eq!(
            Facet::ALL,
            [Facet::Category, Facet::Area, Facet::Ingredient, Facet::Name]
        );
        assert_eq!(Facet::Ingredient.to_string(), "ingredient");
    }

    // ============================================================
    // DECODING TESTS
    // ============================================================

    #[test]
    fn test_decode_null_meals_is_empty() {
        let meals: Vec<Meal> = decode_items("u", r#"{"meals": null}"#).unwrap();
        assert!(meals.is_empty());

        let meals: Vec<Meal> = decode_items("u", r#"{}"#).unwrap();
        assert!(meals.is_empty());

        let meals: Vec<Meal> = decode_items("u", "  ").unwrap();
        assert!(meals.is_empty());
    }

    #[test]
    fn test_decode_list_entries_without_default() {
        let entries: Vec<CategoryEntry> =
            decode_items("u", r#"{"meals": [{"strCategory": "Beef"}, {}]}"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].str_category.as_deref(), Some("Beef"));
        assert!(entries[1].str_category.is_none());

        let entries: Vec<CategoryEntry> = decode_items("u", r#"{}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_decode_invalid_json_is_error() {
        let result: Result<Vec<Meal>, CatalogError> = decode_items("http://x/filter.php", "<html>");

        match result {
            Err(CatalogError::Decode { url, .. }) => assert_eq!(url, "http://x/filter.php"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    // ============================================================
    // CLIENT TESTS - local stub server
    // ============================================================

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn stub_router(search_hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/filter.php",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let meals = match (params.get("c"), params.get("i")) {
                        (Some(c), _) if c == "Seafood" => serde_json::json!([
                            filter_meal_json("10", "Baked salmon"),
                            filter_meal_json("11", "Fish pie"),
                        ]),
                        (_, Some(i)) if i == "chicken breast" => {
                            serde_json::json!([filter_meal_json("20", "Chicken Handi")])
                        }
                        _ => serde_json::Value::Null,
                    };
                    Json(serde_json::json!({ "meals": meals }))
                }),
            )
            .route(
                "/search.php",
                get(move || {
                    let hits = search_hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                }),
            )
            .route(
                "/lookup.php",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    if params.get("i").map(String::as_str) == Some("52772") {
                        Json(serde_json::json!({ "meals": [full_meal_json()] }))
                    } else {
                        Json(serde_json::json!({ "meals": null }))
                    }
                }),
            )
            .route(
                "/list.php",
                get(|| async {
                    Json(serde_json::json!({
                        "meals": [
                            { "strCategory": "Beef" },
                            { "strCategory": "" },
                            { "strCategory": "Dessert" }
                        ]
                    }))
                }),
            )
    }

    async fn stub_client(attempts: usize) -> (MealDbClient, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(stub_router(hits.clone())).await;
        (
            MealDbClient::new(&base, Duration::from_secs(2), attempts),
            hits,
        )
    }

    #[tokio::test]
    async fn test_client_by_category() {
        let (client, _) = stub_client(1).await;

        let recipes = client.by_category("Seafood").await.unwrap();

        let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "11"]);
    }

    #[tokio::test]
    async fn test_client_not_found_is_empty() {
        let (client, _) = stub_client(1).await;

        assert!(client.by_area("Atlantis").await.unwrap().is_empty());
        assert!(client.recipe_by_id("0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_client_encodes_parameters() {
        let (client, _) = stub_client(1).await;

        let recipes = client
            .lookup(Facet::Ingredient, "chicken breast")
            .await
            .unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Chicken Handi");
    }

    #[tokio::test]
    async fn test_client_retries_server_errors() {
        let (client, hits) = stub_client(3).await;

        let result = client.by_name("pie").await;

        match result {
            Err(CatalogError::RetriesExhausted {
                attempts, source, ..
            }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, CatalogError::Status { status: 503, .. }));
            }
            other => panic!("expected exhausted retries, got {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_single_attempt_returns_failure_as_is() {
        let (client, hits) = stub_client(1).await;

        let result = client.by_name("pie").await;

        match result {
            Err(CatalogError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_lookup_and_lists() {
        let (client, _) = stub_client(1).await;

        let recipe = client.recipe_by_id("52772").await.unwrap().unwrap();
        assert_eq!(recipe.name, "Teriyaki Chicken Casserole");

        let categories = client.categories().await.unwrap();
        assert_eq!(categories, vec!["Beef", "Dessert"]);
    }

    #[tokio::test]
    async fn test_client_unreachable_host_is_http_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = MealDbClient::new(&format!("http://{}", addr), Duration::from_secs(1), 1);
        let result = client.by_category("Beef").await;

        assert!(matches!(result, Err(CatalogError::Http { .. })));
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = MealDbClient::new("http://host/api/", Duration::from_secs(1), 0);
        assert_eq!(client.base_url(), "http://host/api");
    }
}
