use tracing_subscriber::EnvFilter;
use yoga_server::{build_app, serve, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (from repo root)
    dotenvy::from_filename("../../.env").ok();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("yoga_server=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let port = config.server_port;

    let state = AppState::new(config)?;
    let app = build_app(state)?;

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("yoga-server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve(listener, app).await?;
    Ok(())
}
