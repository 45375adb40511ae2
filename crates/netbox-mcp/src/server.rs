//! NetBoxServer - MCP server that exposes NetBox operations as tools.
//!
//! This module implements the core MCP server manually implementing
//! ServerHandler to expose NetBox queries, mutations, and usage-guide
//! prompts.

use crate::config::NetBoxMcpConfig;
use crate::prompts;
use crate::types::*;

use chrono::{NaiveTime, Utc};
use netbox_core::{catalog, NetBoxClient};
use rmcp::{
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData,
};
use schemars::schema_for;
use serde_json::Value;
use std::sync::Arc;

/// MCP server for NetBox operations.
///
/// Exposes NetBox object queries, mutations, and changelog access as MCP
/// tools that AI agents can invoke.
#[derive(Clone)]
pub struct NetBoxServer {
    /// REST client from netbox-core
    client: Arc<NetBoxClient>,
}

impl NetBoxServer {
    /// Create a new NetBoxServer from the given configuration.
    ///
    /// Fails when the configured NetBox URL cannot be parsed.
    pub fn new(config: &NetBoxMcpConfig) -> netbox_core::Result<Self> {
        let client = NetBoxClient::new(&config.netbox_url, &config.netbox_token)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Resolve an object type name to its API endpoint, or produce the
    /// tool error listing all valid types.
    fn resolve_endpoint(object_type: &str) -> Result<&'static str, CallToolResult> {
        catalog::endpoint_for(object_type).ok_or_else(|| {
            let valid_types = catalog::valid_types()
                .iter()
                .map(|t| format!("- {t}"))
                .collect::<Vec<_>>()
                .join("\n");
            Self::error_result(format!(
                "Invalid object_type '{object_type}'. Must be one of:\n{valid_types}"
            ))
        })
    }

    /// Helper to create success result with JSON content
    fn json_result<T: serde::Serialize>(data: &T) -> CallToolResult {
        match serde_json::to_string_pretty(data) {
            Ok(json) => CallToolResult::success(vec![Content::text(json)]),
            Err(e) => CallToolResult::error(vec![Content::text(format!(
                "JSON serialization error: {e}"
            ))]),
        }
    }

    /// Helper to create error result
    fn error_result(message: impl Into<String>) -> CallToolResult {
        CallToolResult::error(vec![Content::text(message.into())])
    }

    /// Convert schemars RootSchema to rmcp JsonObject
    fn schema_to_json_object<T: schemars::JsonSchema>(
    ) -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schema_for!(T);
        let json = serde_json::to_value(&schema.schema).unwrap_or_else(|_| serde_json::json!({}));
        match json {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Create an empty schema for tools with no parameters
    fn empty_schema() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let mut map = serde_json::Map::new();
        map.insert("type".into(), serde_json::json!("object"));
        map.insert("properties".into(), serde_json::json!({}));
        Arc::new(map)
    }

    // ========================================================================
    // Tool Implementations
    // ========================================================================

    async fn handle_get_objects(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        let params: GetObjectsParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(Some(p)) => p,
            _ => return Self::error_result("Missing required parameter: object_type"),
        };

        let endpoint = match Self::resolve_endpoint(&params.object_type) {
            Ok(e) => e,
            Err(result) => return result,
        };

        let filters = params.filters.unwrap_or_default();
        tracing::info!(endpoint, ?filters, "Fetching objects");

        match self.client.list(endpoint, &filters).await {
            Ok(objects) => Self::json_result(&objects),
            Err(e) => {
                tracing::error!(endpoint, error = %e, "Failed to fetch objects");
                Self::error_result(format!("Failed to fetch objects: {e}"))
            }
        }
    }

    async fn handle_get_count_objects(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        let params: CountObjectsParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(Some(p)) => p,
            _ => return Self::error_result("Missing required parameter: object_type"),
        };

        let endpoint = match Self::resolve_endpoint(&params.object_type) {
            Ok(e) => e,
            Err(result) => return result,
        };

        let filters = params.filters.unwrap_or_default();
        tracing::info!(endpoint, ?filters, "Counting objects");

        // A failed count reports zero rather than erroring, so agents can
        // keep going with a conservative answer.
        match self.client.count(endpoint, &filters).await {
            Ok(count) => Self::json_result(&CountObjectsResult { count }),
            Err(e) => {
                tracing::error!(endpoint, error = %e, "Failed to count objects");
                Self::json_result(&CountObjectsResult { count: 0 })
            }
        }
    }

    async fn handle_get_object_by_id(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        let params: GetObjectByIdParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(Some(p)) => p,
            _ => return Self::error_result("Missing required parameters: object_type, object_id"),
        };

        let endpoint = match Self::resolve_endpoint(&params.object_type) {
            Ok(e) => e,
            Err(result) => return result,
        };

        tracing::info!(endpoint, object_id = params.object_id, "Fetching object");

        match self.client.detail(endpoint, params.object_id).await {
            Ok(object) => Self::json_result(&object),
            Err(e) => {
                tracing::error!(endpoint, object_id = params.object_id, error = %e, "Failed to fetch object");
                Self::error_result(format!("Failed to fetch object: {e}"))
            }
        }
    }

    async fn handle_get_custom_fields(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        let params: GetCustomFieldsParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(Some(p)) => p,
            _ => return Self::error_result("Missing required parameter: object_type"),
        };

        let endpoint = match Self::resolve_endpoint(&params.object_type) {
            Ok(e) => e,
            Err(result) => return result,
        };

        let filters = params.filters.unwrap_or_default();
        tracing::info!(endpoint, ?filters, "Fetching custom fields");

        match self.client.list(endpoint, &filters).await {
            Ok(items) => {
                let fields: Vec<CustomFieldInfo> = items.iter().map(project_custom_field).collect();
                tracing::info!(count = fields.len(), "Retrieved custom fields");
                Self::json_result(&fields)
            }
            Err(e) => {
                tracing::error!(endpoint, error = %e, "Failed to fetch custom fields");
                Self::error_result(format!("Failed to fetch custom fields: {e}"))
            }
        }
    }

    async fn handle_get_current_time_iso(&self) -> CallToolResult {
        let current_time = start_of_day_utc();
        tracing::info!(%current_time, "Current time requested");
        Self::json_result(&CurrentTimeResult { current_time })
    }

    async fn handle_get_changelogs(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        // Arguments are optional, but when present they must parse; a
        // wrongly-typed filters value must not degrade into "no filters".
        let params: GetChangelogsParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(p) => p.unwrap_or_default(),
            Err(e) => return Self::error_result(format!("Invalid parameters: {e}")),
        };

        let filters = params.filters.unwrap_or_default();
        tracing::info!(?filters, "Fetching changelogs");

        match self.client.list(catalog::CHANGELOG_ENDPOINT, &filters).await {
            Ok(entries) => {
                if entries.is_empty() {
                    tracing::warn!("No changelogs found with the specified filters");
                }
                tracing::info!(count = entries.len(), "Retrieved changelogs");
                Self::json_result(&entries)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch changelogs");
                Self::error_result(format!("Failed to fetch changelogs: {e}"))
            }
        }
    }

    async fn handle_create_object(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        let params: CreateObjectParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(Some(p)) => p,
            _ => return Self::error_result("Missing required parameters: object_type, data"),
        };

        let endpoint = match Self::resolve_endpoint(&params.object_type) {
            Ok(e) => e,
            Err(result) => return result,
        };

        tracing::info!(endpoint, "Creating object");

        match self
            .client
            .create(endpoint, &Value::Object(params.data))
            .await
        {
            Ok(created) => Self::json_result(&created),
            Err(e) => {
                tracing::error!(endpoint, error = %e, "Failed to create object");
                Self::error_result(format!("Failed to create object: {e}"))
            }
        }
    }

    async fn handle_update_object(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        let params: UpdateObjectParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(Some(p)) => p,
            _ => {
                return Self::error_result(
                    "Missing required parameters: object_type, object_id, data",
                )
            }
        };

        let endpoint = match Self::resolve_endpoint(&params.object_type) {
            Ok(e) => e,
            Err(result) => return result,
        };

        tracing::info!(endpoint, object_id = params.object_id, "Updating object");

        match self
            .client
            .update(endpoint, params.object_id, &Value::Object(params.data))
            .await
        {
            Ok(updated) => Self::json_result(&updated),
            Err(e) => {
                tracing::error!(endpoint, object_id = params.object_id, error = %e, "Failed to update object");
                Self::error_result(format!("Failed to update object: {e}"))
            }
        }
    }

    async fn handle_delete_object(
        &self,
        args: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> CallToolResult {
        let params: DeleteObjectParams = match args
            .map(|a| serde_json::from_value(serde_json::Value::Object(a)))
            .transpose()
        {
            Ok(Some(p)) => p,
            _ => return Self::error_result("Missing required parameters: object_type, object_id"),
        };

        let endpoint = match Self::resolve_endpoint(&params.object_type) {
            Ok(e) => e,
            Err(result) => return result,
        };

        tracing::info!(endpoint, object_id = params.object_id, "Deleting object");

        match self.client.delete(endpoint, params.object_id).await {
            Ok(()) => Self::json_result(&DeleteObjectResult { success: true }),
            Err(e) => {
                tracing::error!(endpoint, object_id = params.object_id, error = %e, "Failed to delete object");
                Self::error_result(format!("Failed to delete object: {e}"))
            }
        }
    }

    /// Build the list of available tools
    fn build_tools_list() -> Vec<Tool> {
        vec![
            Tool::new(
                "get_objects",
                "Get objects from NetBox based on their type and filters.",
                Self::schema_to_json_object::<GetObjectsParams>(),
            ),
            Tool::new(
                "get_count_objects",
                "Count objects in NetBox based on their type and filters.",
                Self::schema_to_json_object::<CountObjectsParams>(),
            ),
            Tool::new(
                "get_object_by_id",
                "Get detailed information about a specific NetBox object by its ID.",
                Self::schema_to_json_object::<GetObjectByIdParams>(),
            ),
            Tool::new(
                "get_custom_fields",
                "Retrieve custom field definitions for NetBox objects.",
                Self::schema_to_json_object::<GetCustomFieldsParams>(),
            ),
            Tool::new(
                "get_current_time_iso",
                "Get the start of the current UTC day in ISO 8601 format.",
                Self::empty_schema(),
            ),
            Tool::new(
                "get_changelogs",
                "Get object change records (changelogs) from NetBox.",
                Self::schema_to_json_object::<GetChangelogsParams>(),
            ),
            Tool::new(
                "create_object",
                "Create a new object in NetBox.",
                Self::schema_to_json_object::<CreateObjectParams>(),
            ),
            Tool::new(
                "update_object",
                "Update an existing object in NetBox using PATCH.",
                Self::schema_to_json_object::<UpdateObjectParams>(),
            ),
            Tool::new(
                "delete_object",
                "Delete an object from NetBox by its ID.",
                Self::schema_to_json_object::<DeleteObjectParams>(),
            ),
        ]
    }
}

/// Start of the current UTC day, ISO 8601 with offset.
///
/// Truncated to midnight so agents can use it directly as a `time_after`
/// changelog filter for "today".
fn start_of_day_utc() -> String {
    Utc::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339()
}

/// Project a NetBox custom field object down to its summary fields.
///
/// Missing fields become JSON null rather than failing the whole result.
fn project_custom_field(item: &Value) -> CustomFieldInfo {
    let field = |name: &str| item.get(name).cloned().unwrap_or(Value::Null);
    CustomFieldInfo {
        id: field("id"),
        name: field("name"),
        object_types: field("object_types"),
        description: field("description"),
    }
}

// ============================================================================
// ServerHandler Implementation
// ============================================================================

impl ServerHandler for NetBoxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "NetBox MCP Server - Query and manage a NetBox network infrastructure \
                 database. Use get_objects and get_count_objects with an object type \
                 (devices, ip-addresses, racks, ...) and optional filters, \
                 get_object_by_id for details, and create_object, update_object, \
                 delete_object for changes. get_changelogs queries the audit trail."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: Self::build_tools_list(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = match request.name.as_ref() {
            "get_objects" => self.handle_get_objects(request.arguments).await,
            "get_count_objects" => self.handle_get_count_objects(request.arguments).await,
            "get_object_by_id" => self.handle_get_object_by_id(request.arguments).await,
            "get_custom_fields" => self.handle_get_custom_fields(request.arguments).await,
            "get_current_time_iso" => self.handle_get_current_time_iso().await,
            "get_changelogs" => self.handle_get_changelogs(request.arguments).await,
            "create_object" => self.handle_create_object(request.arguments).await,
            "update_object" => self.handle_update_object(request.arguments).await,
            "delete_object" => self.handle_delete_object(request.arguments).await,
            _ => Self::error_result(format!("Unknown tool: {}", request.name)),
        };

        Ok(result)
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult {
            prompts: prompts::all_prompts(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        let text = prompts::prompt_text(&request.name).ok_or_else(|| {
            ErrorData::invalid_params(format!("Unknown prompt: {}", request.name), None)
        })?;

        Ok(GetPromptResult {
            description: None,
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportMode;
    use serde_json::json;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    fn test_server() -> NetBoxServer {
        let config = NetBoxMcpConfig {
            netbox_url: "https://netbox.example.com".to_string(),
            netbox_token: "token".to_string(),
            transport_mode: TransportMode::Http,
            http_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 8000),
        };
        NetBoxServer::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_get_changelogs_rejects_malformed_filters() {
        let server = test_server();

        // filters must be an object, not a string
        let mut args = serde_json::Map::new();
        args.insert("filters".into(), json!("time_after=2026-01-01"));

        let result = server.handle_get_changelogs(Some(args)).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_get_changelogs_accepts_missing_arguments() {
        // No arguments means no filters; must not be rejected as malformed.
        let mut args = serde_json::Map::new();
        args.insert("filters".into(), json!(null));
        let params: GetChangelogsParams =
            serde_json::from_value(serde_json::Value::Object(args)).unwrap();
        assert!(params.filters.is_none());
    }

    #[test]
    fn test_build_tools_list() {
        let tools = NetBoxServer::build_tools_list();
        assert_eq!(tools.len(), 9);
        assert!(tools.iter().any(|t| t.name.as_ref() == "get_objects"));
        assert!(tools.iter().any(|t| t.name.as_ref() == "create_object"));
        assert!(tools.iter().any(|t| t.name.as_ref() == "delete_object"));
    }

    #[test]
    fn test_resolve_endpoint_valid() {
        assert_eq!(
            NetBoxServer::resolve_endpoint("devices").ok(),
            Some("dcim/devices")
        );
    }

    #[test]
    fn test_resolve_endpoint_invalid_lists_types() {
        let result = NetBoxServer::resolve_endpoint("bogus");
        assert!(result.is_err());
    }

    #[test]
    fn test_start_of_day_is_midnight() {
        let ts = start_of_day_utc();
        assert!(ts.contains("T00:00:00"), "{ts}");
        assert!(ts.ends_with("+00:00"), "{ts}");
    }

    #[test]
    fn test_project_custom_field() {
        let item = json!({
            "id": 7,
            "name": "year_of_investment",
            "object_types": ["dcim.device"],
            "description": "Year the asset was purchased",
            "type": "text"
        });
        let info = project_custom_field(&item);
        assert_eq!(info.id, json!(7));
        assert_eq!(info.name, json!("year_of_investment"));
        assert_eq!(info.object_types, json!(["dcim.device"]));
    }

    #[test]
    fn test_project_custom_field_missing_fields() {
        let info = project_custom_field(&json!({"id": 1}));
        assert_eq!(info.id, json!(1));
        assert_eq!(info.name, Value::Null);
        assert_eq!(info.description, Value::Null);
    }
}
