use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uma_domain::infrastructure::adapters::EventStream;
use uma_management_api::{build_router, config::LogFormat, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    if !config.requires_api_key() {
        warn!("No API key configured, every request gets read and write access");
    }

    let port = config.port;
    let (state, events) = AppState::from_config(config)?;
    info!(
        "Directory backend: {}",
        state.directory_service.persistence_type()
    );

    tokio::spawn(drain_events(events));

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "uma_management_api=debug,uma_domain=info,tower_http=debug".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Audit trail: one log line per domain event
async fn drain_events(mut events: EventStream) {
    while let Some(event) = events.recv().await {
        info!(
            target: "uma_management_api::audit",
            event_id = %event.id,
            aggregate = %event.aggregate_id,
            subject = event.metadata.subject.as_deref().unwrap_or("anonymous"),
            "{}",
            event.event_type
        );
    }
}
