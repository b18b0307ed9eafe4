use bouquet::config::Config;
use bouquet::routes;
use bouquet::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let port = config.port;
    tracing::info!(registry = ?config.registry, public_url = %config.public_url, "bouquet config loaded");

    let state = AppState::from_config(config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "bouquet listening");
    axum::serve(listener, app).await?;
    Ok(())
}
