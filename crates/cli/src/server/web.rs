use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tollgate_api::{create_api_routes, AppState};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Serve the HTTP API until `shutdown` is cancelled, then drain in-flight
/// requests.
pub async fn start_web_server(
    addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = create_api_routes(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
