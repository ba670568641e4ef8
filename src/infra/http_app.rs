use axum::{
    routing::{any_service, get},
    Router,
};
use std::sync::Arc;

use crate::core::FeedSource;
use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::aqhi::tool_router::register;

/// `/healthz` + streamable MCP at `/mcp`, every session sharing one feed source.
pub fn build_app(source: Arc<dyn FeedSource>) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(move || register(source.clone()), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}
