use pickup_dashboard::auth::EnvToken;
use pickup_dashboard::{router, AppState, UpstreamClient};
use std::{env, net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_BASE_URL: &str =
    "https://xg77afez86.execute-api.eu-north-1.amazonaws.com/prod/evidencija";
const DEFAULT_UPDATE_URL: &str =
    "https://xg77afez86.execute-api.eu-north-1.amazonaws.com/prod/update";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let auth = Arc::new(EnvToken::from_env()?);
    let base_url = env::var("UPSTREAM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let update_url =
        env::var("UPSTREAM_UPDATE_URL").unwrap_or_else(|_| DEFAULT_UPDATE_URL.to_string());

    let upstream = UpstreamClient::new(base_url, update_url, auth);
    let state = AppState::new(upstream);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
