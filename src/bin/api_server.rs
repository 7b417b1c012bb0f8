// API Server Binary Entry Point
//
// Purpose: Start the Axum suitability API
// Usage: cargo run --features api --bin api_server

use pepper_suitability::{create_router, AppState, FallbackDefaults, ScoringProfile};
use std::net::SocketAddr;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "pepper_suitability=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    // SCORING_PROFILE: optional JSON profile; canonical profile when unset
    let profile = match std::env::var("SCORING_PROFILE") {
        Ok(path) => ScoringProfile::load(Path::new(&path))?,
        Err(_) => ScoringProfile::canonical(),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  SCORING_PROFILE: {}", profile.name());
    tracing::info!("  PORT: {}", port);

    let state = AppState::new(profile, FallbackDefaults::default());
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
