//! Tool parameter and response types for MCP tools.
//!
//! These types use serde for serialization and schemars for automatic
//! JSON Schema generation required by MCP.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Queries
// ============================================================================

/// Parameters for listing objects of a type.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetObjectsParams {
    /// NetBox object type (e.g. "devices", "ip-addresses").
    pub object_type: String,

    /// NetBox API filters as field/value pairs (e.g. {"site_id": 1}).
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,
}

/// Parameters for counting objects of a type.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CountObjectsParams {
    /// NetBox object type (e.g. "devices", "ip-addresses").
    pub object_type: String,

    /// NetBox API filters as field/value pairs.
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,
}

/// Result of counting objects.
#[derive(Debug, Serialize, JsonSchema)]
pub struct CountObjectsResult {
    /// Number of matching objects.
    pub count: u64,
}

/// Parameters for fetching one object by ID.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetObjectByIdParams {
    /// NetBox object type (e.g. "devices", "ip-addresses").
    pub object_type: String,

    /// Numeric ID of the object.
    pub object_id: u64,
}

/// Parameters for summarizing custom fields.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetCustomFieldsParams {
    /// NetBox object type to query (e.g. "custom-fields").
    pub object_type: String,

    /// NetBox API filters as field/value pairs.
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,
}

/// Summary of one custom field definition.
#[derive(Debug, Serialize, JsonSchema)]
pub struct CustomFieldInfo {
    /// Unique identifier of the custom field.
    pub id: Value,
    /// Name of the custom field.
    pub name: Value,
    /// Object types the field applies to.
    pub object_types: Value,
    /// Human-readable description.
    pub description: Value,
}

/// Parameters for querying changelogs.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetChangelogsParams {
    /// Changelog filters: user, user_id, changed_object_type_id,
    /// changed_object_id, object_repr, action (create/update/delete),
    /// time_before, time_after (ISO 8601), q.
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,
}

/// Result of the current-time tool.
#[derive(Debug, Serialize, JsonSchema)]
pub struct CurrentTimeResult {
    /// Start of the current UTC day, ISO 8601.
    pub current_time: String,
}

// ============================================================================
// Mutations
// ============================================================================

/// Parameters for creating an object.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateObjectParams {
    /// NetBox object type (e.g. "devices", "ip-addresses").
    pub object_type: String,

    /// Fields of the new object. See the NetBox API documentation for
    /// required fields per object type.
    pub data: Map<String, Value>,
}

/// Parameters for updating an object.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateObjectParams {
    /// NetBox object type (e.g. "devices", "ip-addresses").
    pub object_type: String,

    /// Numeric ID of the object to update.
    pub object_id: u64,

    /// Fields to change. Only include fields being updated (PATCH).
    pub data: Map<String, Value>,
}

/// Parameters for deleting an object.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteObjectParams {
    /// NetBox object type (e.g. "devices", "ip-addresses").
    pub object_type: String,

    /// Numeric ID of the object to delete.
    pub object_id: u64,
}

/// Result of deleting an object.
#[derive(Debug, Serialize, JsonSchema)]
pub struct DeleteObjectResult {
    /// Whether the deletion succeeded.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_objects_params_filters_optional() {
        let params: GetObjectsParams =
            serde_json::from_value(json!({"object_type": "devices"})).unwrap();
        assert_eq!(params.object_type, "devices");
        assert!(params.filters.is_none());
    }

    #[test]
    fn test_get_objects_params_with_filters() {
        let params: GetObjectsParams = serde_json::from_value(json!({
            "object_type": "racks",
            "filters": {"site_id": 1, "name": "H01"}
        }))
        .unwrap();
        let filters = params.filters.unwrap();
        assert_eq!(filters.get("site_id"), Some(&json!(1)));
        assert_eq!(filters.get("name"), Some(&json!("H01")));
    }

    #[test]
    fn test_update_params_require_id_and_data() {
        let result: Result<UpdateObjectParams, _> =
            serde_json::from_value(json!({"object_type": "devices"}));
        assert!(result.is_err());

        let params: UpdateObjectParams = serde_json::from_value(json!({
            "object_type": "devices",
            "object_id": 123,
            "data": {"status": "maintenance"}
        }))
        .unwrap();
        assert_eq!(params.object_id, 123);
    }

    #[test]
    fn test_changelog_params_default() {
        let params = GetChangelogsParams::default();
        assert!(params.filters.is_none());
    }
}
