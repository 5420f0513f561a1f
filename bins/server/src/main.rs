//! Tradeline API Server
//!
//! Main entry point for the credit allocation and approval service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tradeline_api::{AppState, create_router};
use tradeline_core::{DomainEvent, EventBus, TradeFinanceService};
use tradeline_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tradeline=debug,tradeline_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Create JWT service
    let jwt_service = JwtService::from_settings(&config.jwt);

    // Create the business service and its event fan-out
    let events = EventBus::new(config.events.channel_capacity);
    let service = TradeFinanceService::new(config.finance.currency_decimal_places, events);
    tokio::spawn(log_events(service.subscribe()));
    info!(
        decimal_places = config.finance.currency_decimal_places,
        channel_capacity = config.events.channel_capacity,
        "Trade finance service ready"
    );

    let state = AppState {
        service: Arc::new(service),
        jwt_service: Arc::new(jwt_service),
    };
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Writes every committed domain event to the log.
async fn log_events(mut events: broadcast::Receiver<DomainEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => info!(event = event.name(), ?event, "Domain event"),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event log fell behind"),
            Err(RecvError::Closed) => break,
        }
    }
}
