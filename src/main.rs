use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timetable_console::client::HttpTransport;
use timetable_console::config::ConsoleConfig;
use timetable_console::routes::router;
use timetable_console::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "timetable_console=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConsoleConfig::new_from_env()?;
    info!("using timetable API at {}", config.api_base_url);

    let transport = HttpTransport::new(&config)?;
    let state = AppState::new(Arc::new(transport));

    if let Err(e) = state.cache.refresh_all(&state.api).await {
        warn!("initial reference load failed, dropdowns start empty: {}", e);
    }

    let app = router(state);

    info!("listening on http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
