//! # netbox-mcp
//!
//! MCP (Model Context Protocol) server exposing NetBox to AI agents.
//!
//! This crate lets AI agents (Claude Desktop, Cursor, remote agents) query
//! and modify a NetBox network-infrastructure database through MCP tools.
//!
//! ## Quick Start
//!
//! ```bash
//! export NETBOX_URL=https://netbox.example.com
//! export NETBOX_TOKEN=0123456789abcdef
//! cargo run -p netbox-mcp
//! ```
//!
//! By default the server listens for streamable HTTP MCP traffic on port
//! 8000. Set `NETBOX_MCP_TRANSPORT=stdio` (or `both`) for local AI tools.
//!
//! ## MCP Tools
//!
//! | Tool | Description |
//! |------|-------------|
//! | `get_objects` | List objects of a type with optional filters |
//! | `get_count_objects` | Count objects of a type with optional filters |
//! | `get_object_by_id` | Fetch one object by numeric ID |
//! | `get_custom_fields` | Summarize custom field definitions |
//! | `get_changelogs` | Query object change records |
//! | `get_current_time_iso` | Current UTC day start, ISO 8601 |
//! | `create_object` | Create an object |
//! | `update_object` | Partially update an object |
//! | `delete_object` | Delete an object |

mod config;
pub mod http;
mod prompts;
mod server;
mod types;

pub use config::{ConfigError, NetBoxMcpConfig, TransportMode};
pub use server::NetBoxServer;
pub use types::*;
