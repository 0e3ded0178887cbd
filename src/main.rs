use std::sync::Arc;

use gridchat::config::AppConfig;
use gridchat::grid::{GridClient, ProjectXRevenueModel};
use gridchat::llm::{ResponsesClient, ToolRegistry, TooledChat};
use gridchat::routes::configure_routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Fail fast if required configuration is absent
    let config = AppConfig::from_env()?;

    let grid = Arc::new(GridClient::new(&config)?);
    let mut registry = ToolRegistry::new();
    ProjectXRevenueModel::new(grid).register(&mut registry)?;

    let backend = ResponsesClient::new(&config)?;
    let chat = Arc::new(TooledChat::new(Box::new(backend), registry));

    let routes = configure_routes(chat);

    tracing::info!("Starting server on http://127.0.0.1:3030");
    warp::serve(routes).run(([127, 0, 0, 1], 3030)).await;

    Ok(())
}
