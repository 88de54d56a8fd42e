use recipe_query::catalog::MealDbClient;
use recipe_query::config::Config;
use recipe_query::search::RecipeService;
use recipe_query::search::handlers::router;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::load()?;

    // 1. Catalog client:
    let client = MealDbClient::from_config(&config.catalog);
    tracing::info!(
        "Using recipe catalog at {} (timeout {}ms, {} attempts)",
        client.base_url(),
        config.catalog.timeout_ms,
        config.catalog.retry_attempts
    );

    // 2. Service and router:
    let service = RecipeService::new(Arc::new(client), config.search.clone());
    let app = router(service, &config.allowed_origins);

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Allowed origins: {:?}", config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
