use cacheside_api::{create_app, AppState};
use cacheside_domain::Config;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub async fn start_web_server(config: &Config, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;

    let app = create_app(state, &config.server.cors_allowed_origins);
    let listener = TcpListener::bind(addr).await?;

    info!(
        "Products endpoint: http://{}/api/products (also /products)",
        addr
    );
    info!("Server ready, press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
