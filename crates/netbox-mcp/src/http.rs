//! HTTP transport for remote AI agents.
//!
//! This module provides an HTTP server that exposes the MCP protocol via
//! rmcp's StreamableHttpService, enabling remote AI agents to query NetBox.
//!
//! ## Endpoints
//!
//! - `POST /mcp` - JSON-RPC requests
//! - `GET /mcp` - SSE stream for server-initiated messages
//! - `GET /health` - Health check
//! - `GET /` - Server info

use crate::server::NetBoxServer;
use axum::{
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the HTTP router for the MCP server.
///
/// The returned router can be served directly with axum or composed
/// into a larger application.
pub fn build_router(server: NetBoxServer) -> Router {
    tracing::debug!("Building HTTP router");

    // Create session manager for handling MCP sessions
    let session_manager = Arc::new(LocalSessionManager::default());

    // Create the StreamableHttpService from rmcp
    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        session_manager,
        StreamableHttpServerConfig::default(),
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/", get(root_handler))
        // MCP endpoint as a fallback/nested service
        .fallback_service(mcp_service)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    tracing::debug!("HTTP router built with routes: /, /health, /mcp");
    router
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    tracing::trace!("Health check request");
    Json(serde_json::json!({
        "status": "healthy",
        "service": "netbox-mcp"
    }))
}

/// Root endpoint with server info.
async fn root_handler() -> impl IntoResponse {
    tracing::trace!("Root page request");
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>NetBox MCP Server</title>
    <style>
        body { font-family: system-ui; max-width: 800px; margin: 50px auto; padding: 20px; }
        code { background: #f4f4f4; padding: 2px 6px; border-radius: 3px; }
        pre { background: #f4f4f4; padding: 16px; border-radius: 6px; overflow-x: auto; }
    </style>
</head>
<body>
    <h1>NetBox MCP Server</h1>
    <p>Model Context Protocol server for querying and managing NetBox.</p>

    <h2>Endpoints</h2>
    <ul>
        <li><code>POST /mcp</code> - MCP JSON-RPC requests</li>
        <li><code>GET /mcp</code> - SSE stream for server messages</li>
        <li><code>GET /health</code> - Health check</li>
    </ul>

    <h2>Example</h2>
    <pre>curl -X POST http://localhost:8000/mcp \
  -H "Content-Type: application/json" \
  -d '{"jsonrpc":"2.0","id":1,"method":"tools/list"}'</pre>

    <h2>Available Tools</h2>
    <ul>
        <li><code>get_objects</code> - List objects of a type with filters</li>
        <li><code>get_count_objects</code> - Count objects of a type</li>
        <li><code>get_object_by_id</code> - Fetch one object by ID</li>
        <li><code>get_custom_fields</code> - Summarize custom field definitions</li>
        <li><code>get_changelogs</code> - Query object change records</li>
        <li><code>get_current_time_iso</code> - Current UTC day start</li>
        <li><code>create_object</code> - Create an object</li>
        <li><code>update_object</code> - Partially update an object</li>
        <li><code>delete_object</code> - Delete an object</li>
    </ul>
</body>
</html>"#,
    )
}

/// Start the HTTP server.
///
/// This function runs until the server is shut down via the provided
/// shutdown signal.
pub async fn serve(
    server: NetBoxServer,
    addr: std::net::SocketAddr,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let router = build_router(server);

    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::debug!(%addr, "TCP listener bound");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetBoxMcpConfig;
    use crate::TransportMode;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    #[test]
    fn test_build_router() {
        let config = NetBoxMcpConfig {
            netbox_url: "https://netbox.example.com".to_string(),
            netbox_token: "token".to_string(),
            transport_mode: TransportMode::Http,
            http_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 8000),
        };
        let server = NetBoxServer::new(&config).unwrap();
        let _router = build_router(server);
        // Router builds without panic
    }
}
