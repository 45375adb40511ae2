//! NetBox MCP Server entry point.
//!
//! This binary starts the MCP server over streamable HTTP (default) and/or
//! stdio, bridging AI agents to a NetBox instance configured via
//! `NETBOX_URL` and `NETBOX_TOKEN`.
//!
//! ## Transport Modes
//!
//! - **http** (default): Streamable HTTP on port 8000, matching the
//!   containerized deployment
//! - **stdio**: Only stdio transport, for local AI tools
//! - **both**: Runs stdio + HTTP simultaneously

use anyhow::Context;
use netbox_mcp::{http, NetBoxMcpConfig, NetBoxServer};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tokio::signal;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up NETBOX_URL / NETBOX_TOKEN from a .env file when present
    dotenv::dotenv().ok();

    // Initialize tracing - logs go to stderr (stdout is MCP transport)
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("netbox_mcp=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting NetBox MCP Server");

    // Load configuration from environment, failing fast on missing values
    let config = NetBoxMcpConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        netbox_url = %config.netbox_url,
        transport = ?config.transport_mode,
        "Configuration loaded"
    );

    // Create the server (validates the NetBox URL)
    let server = NetBoxServer::new(&config).context("failed to create NetBox client")?;

    // Create shutdown broadcast channel
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    // Spawn transports based on configuration
    let mut handles = Vec::new();

    // HTTP transport
    if config.transport_mode.http_enabled() {
        let http_server = server.clone();
        let http_addr = config.http_addr;
        let mut shutdown_rx = shutdown_tx.subscribe();

        let http_handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.recv().await;
            };

            if let Err(e) = http::serve(http_server, http_addr, shutdown).await {
                tracing::error!(error = %e, "HTTP server error");
            }
        });

        handles.push(http_handle);
        tracing::info!(addr = %config.http_addr, "HTTP transport enabled");
    }

    // Stdio transport
    if config.transport_mode.stdio_enabled() {
        let stdio_server = server.clone();
        let mut shutdown_rx = shutdown_tx.subscribe();

        let stdio_handle = tokio::spawn(async move {
            match stdio_server.serve(stdio()).await {
                Ok(service) => {
                    tokio::select! {
                        result = service.waiting() => {
                            if let Err(e) = result {
                                tracing::error!(error = %e, "Stdio service error");
                            }
                        }
                        _ = async { shutdown_rx.recv().await } => {
                            tracing::info!("Stdio transport shutting down");
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to start stdio transport");
                }
            }
        });

        handles.push(stdio_handle);
        tracing::info!("Stdio transport enabled");
    }

    tracing::info!("Server ready");

    // Wait for shutdown signal
    signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal, shutting down...");

    // Broadcast shutdown to all transports
    let _ = shutdown_tx.send(());

    // Wait for transport handles to complete
    for handle in handles {
        let _ = handle.await;
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
