//! # netbox-core
//!
//! NetBox REST API client layer for the NetBox MCP server.
//!
//! This crate provides a thin, typed wrapper over the NetBox REST API:
//! an object-type catalog that maps agent-facing names (`devices`,
//! `ip-addresses`, `changelogs`) to API endpoints, and a [`NetBoxClient`]
//! that handles token authentication, pagination, and error mapping.
//!
//! ## Quick Start
//!
//! ```ignore
//! use netbox_core::{catalog, NetBoxClient};
//!
//! # async fn example() -> netbox_core::Result<()> {
//! let client = NetBoxClient::new("https://netbox.example.com", "s3cr3t")?;
//!
//! let endpoint = catalog::endpoint_for("devices").unwrap();
//! let devices = client.list(endpoint, &Default::default()).await?;
//! println!("{} devices", devices.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
mod client;
mod error;

pub use client::NetBoxClient;
pub use error::{NetBoxError, Result};
