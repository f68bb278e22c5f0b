use std::sync::Arc;

use insight_core::{GeneratorConfig, InsightGenerator, InsightPolicy, OpenRouterGenerator};
use insight_service::{AppState, build_router, telemetry::init_tracing};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // The provider credential is read once; without it nothing can be served.
    let config = match GeneratorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot start without a text-generation credential");
            std::process::exit(1);
        }
    };

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let generator = Arc::new(OpenRouterGenerator::new(&config));
    let insights = InsightGenerator::new(generator, config.model.clone(), InsightPolicy::default());
    let app = build_router(AppState::new(insights));

    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    let addr = listener.local_addr()?;

    info!(model = %config.model, "Movie insights service starting on {}", addr);
    info!("Facts endpoint: POST http://{}/insights/facts", addr);
    info!("Suggestion endpoint: GET http://{}/insights/suggestion", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
