//! CodeMentor - development server entry point

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codementor::{config::CONFIG, create_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CodeMentor dev server...");

    if CONFIG.feedback.delay_ms > 0 {
        tracing::info!(delay_ms = CONFIG.feedback.delay_ms, "Feedback will be reported pending after each submission");
    }

    let state = AppState::new(CONFIG.clone());
    let app = create_router(state);

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Dev server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
