pub mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use common::{PriceSource, Result, ZeroLagMacdParams};

/// Shared application state injected into every route handler.
#[derive(Clone)]
pub struct AppState {
    /// Where the default price series comes from.
    pub source: Arc<dyn PriceSource>,
    /// Parameters used for any field a request leaves out.
    pub defaults: ZeroLagMacdParams,
}

/// Build the full router: REST, WebSocket and health routes.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    Router::new()
        .merge(routes::api_router())
        .merge(routes::ws_router())
        .merge(routes::health_router())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Run the Axum API server until `shutdown` resolves.
pub async fn serve(
    state: AppState,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let source = state.source.name().to_string();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, %source, "Indicator API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
