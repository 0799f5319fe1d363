use axum::{
    routing::{any_service, get},
    Router,
};
use std::sync::Arc;

use crate::infra::runtime::mcp_transport::{self, LocalSessionManager};
use crate::tools::forecast::ForecastSvc;

/// `/healthz` plus the streamable MCP endpoint at `/mcp`. Every session is
/// served by a clone of the same `ForecastSvc`.
pub fn build_app(svc: ForecastSvc) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let factory = move || (svc.clone(), ForecastSvc::router());
    let mcp_service = mcp_transport::make_streamable_http_service(factory, session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}
