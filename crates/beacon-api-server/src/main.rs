use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use beacon_api_server::config::Settings;
use beacon_api_server::handlers;
use beacon_api_server::services::{ConversationOrchestrator, OllamaClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,beacon_api_server=debug".to_string()),
        )
        .with_target(true)
        .init();

    info!("🚀 Starting Beacon API Server...");

    // Load configuration
    let settings = Settings::load()?;
    info!("✅ Configuration loaded (model: {})", settings.llm.model);

    // Initialize services
    let generation_client = Arc::new(OllamaClient::new(settings.llm.clone()));

    let orchestrator = Arc::new(ConversationOrchestrator::new(
        generation_client,
        settings.prompts.system_prompt.clone(),
        &settings.chat,
    ));

    // Periodic sweep of expired sessions (expiry is otherwise lazy)
    let sweeper = orchestrator.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            interval.tick().await;
            sweeper.cleanup_expired_sessions();
        }
    });

    // Build router
    let app = handlers::router(orchestrator);

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
