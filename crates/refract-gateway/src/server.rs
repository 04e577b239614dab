//! Router construction and the serve loop.

use crate::pipeline;
use crate::shutdown::ShutdownCoordinator;
use crate::table::RouteTable;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router: one `POST` handler per configured route,
/// all sharing a single pooled HTTP client for the backend hop. Requests
/// with another method on a known path get axum's 405.
pub fn router(table: RouteTable, client: reqwest::Client) -> Router {
    let mut app = Router::new();
    for (path, route) in table.into_routes() {
        let route = Arc::new(route);
        let client = client.clone();
        app = app.route(
            &path,
            post(move |headers: HeaderMap, body: Bytes| {
                let route = Arc::clone(&route);
                let client = client.clone();
                async move { pipeline::handle(route, client, headers, body).await }
            }),
        );
    }
    app.layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until the shutdown coordinator fires, then drain
/// gracefully. Returns the exit code the coordinator was triggered with.
pub async fn serve(
    addr: SocketAddr,
    app: Router,
    shutdown: ShutdownCoordinator,
) -> anyhow::Result<i32> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    let signal = shutdown.wait();
    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await?;
    Ok(shutdown.exit_code())
}
