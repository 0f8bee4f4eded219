mod agent;
mod config;
mod errors;
mod listings;
mod llm_client;
mod results;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agent::SearchAgent;
use crate::config::Config;
use crate::listings::{ActiveJobsAdapter, LinkedInAdapter, ListingAdapter, RapidApi};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Scout v{}", env!("CARGO_PKG_VERSION"));

    // Initialize reasoning model client
    let llm = LlmClient::new(
        config.groq_api_key.clone(),
        config.groq_model.clone(),
        config.llm_temperature,
    );
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize listing tools, in the order they are offered to the model
    let rapidapi = RapidApi::new(config.rapidapi_key.clone());
    let tools: Vec<Arc<dyn ListingAdapter>> = vec![
        Arc::new(ActiveJobsAdapter::new(
            rapidapi.clone(),
            config.active_jobs_url.clone(),
        )),
        Arc::new(LinkedInAdapter::new(
            rapidapi,
            config.linkedin_jobs_url.clone(),
        )),
    ];
    info!(
        "Listing tools initialized: {}",
        tools.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
    );

    // Build app state
    let state = AppState {
        engine: Arc::new(SearchAgent::new(
            Arc::new(llm),
            tools,
            config.agent_max_iterations,
        )),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
