//! Configuration for the MCP server.
//!
//! NetBox connection settings are required and loaded from environment
//! variables (or a `.env` file); transport settings have defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// Stdio only (for local AI tools like Claude Desktop)
    Stdio,
    /// HTTP only (default - matches the containerized deployment)
    #[default]
    Http,
    /// Both stdio and HTTP
    Both,
}

impl TransportMode {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "stdio" => Self::Stdio,
            "both" => Self::Both,
            _ => Self::Http,
        }
    }

    /// Check if stdio transport should be enabled.
    pub fn stdio_enabled(&self) -> bool {
        matches!(self, Self::Stdio | Self::Both)
    }

    /// Check if HTTP transport should be enabled.
    pub fn http_enabled(&self) -> bool {
        matches!(self, Self::Http | Self::Both)
    }
}

/// Configuration for the NetBox MCP server.
#[derive(Debug, Clone)]
pub struct NetBoxMcpConfig {
    /// Base URL of the NetBox instance.
    pub netbox_url: String,

    /// NetBox API token.
    pub netbox_token: String,

    /// Transport mode (default: HTTP).
    pub transport_mode: TransportMode,

    /// HTTP server bind address.
    pub http_addr: SocketAddr,
}

/// Configuration validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("NETBOX_URL environment variable must be set")]
    MissingUrl,

    #[error("NETBOX_TOKEN environment variable must be set")]
    MissingToken,
}

impl NetBoxMcpConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `NETBOX_URL` | required |
    /// | `NETBOX_TOKEN` | required |
    /// | `NETBOX_MCP_TRANSPORT` | `http` (stdio, http, both) |
    /// | `NETBOX_MCP_HTTP_HOST` | `0.0.0.0` |
    /// | `NETBOX_MCP_HTTP_PORT` | `8000` |
    ///
    /// Fails fast when `NETBOX_URL` or `NETBOX_TOKEN` is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let netbox_url = std::env::var("NETBOX_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingUrl)?;

        let netbox_token = std::env::var("NETBOX_TOKEN")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let http_host: IpAddr = match std::env::var("NETBOX_MCP_HTTP_HOST") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(%value, "Unparseable NETBOX_MCP_HTTP_HOST, binding 0.0.0.0");
                IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
            }),
            Err(_) => IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
        };

        let http_port: u16 = match std::env::var("NETBOX_MCP_HTTP_PORT") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(%value, "Unparseable NETBOX_MCP_HTTP_PORT, binding port 8000");
                8000
            }),
            Err(_) => 8000,
        };

        let transport_mode = std::env::var("NETBOX_MCP_TRANSPORT")
            .map(|v| TransportMode::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            netbox_url,
            netbox_token,
            transport_mode,
            http_addr: SocketAddr::new(http_host, http_port),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mode_parsing() {
        assert_eq!(TransportMode::parse("stdio"), TransportMode::Stdio);
        assert_eq!(TransportMode::parse("STDIO"), TransportMode::Stdio);
        assert_eq!(TransportMode::parse("http"), TransportMode::Http);
        assert_eq!(TransportMode::parse("both"), TransportMode::Both);
        assert_eq!(TransportMode::parse("anything"), TransportMode::Http);
    }

    #[test]
    fn test_transport_mode_flags() {
        assert!(TransportMode::Stdio.stdio_enabled());
        assert!(!TransportMode::Stdio.http_enabled());

        assert!(!TransportMode::Http.stdio_enabled());
        assert!(TransportMode::Http.http_enabled());

        assert!(TransportMode::Both.stdio_enabled());
        assert!(TransportMode::Both.http_enabled());
    }

    #[test]
    fn test_default_transport_is_http() {
        assert_eq!(TransportMode::default(), TransportMode::Http);
    }

    // Sole test that touches the process environment, to avoid races.
    #[test]
    fn test_from_env_unparseable_bind_values_fall_back() {
        std::env::set_var("NETBOX_URL", "https://netbox.example.com");
        std::env::set_var("NETBOX_TOKEN", "token");
        std::env::set_var("NETBOX_MCP_HTTP_HOST", "not-an-ip");
        std::env::set_var("NETBOX_MCP_HTTP_PORT", "not-a-port");

        let config = NetBoxMcpConfig::from_env().unwrap();
        assert_eq!(config.http_addr.ip(), IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(config.http_addr.port(), 8000);

        std::env::remove_var("NETBOX_URL");
        std::env::remove_var("NETBOX_TOKEN");
        std::env::remove_var("NETBOX_MCP_HTTP_HOST");
        std::env::remove_var("NETBOX_MCP_HTTP_PORT");
    }
}
