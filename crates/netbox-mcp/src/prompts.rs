//! Usage-guide prompts served over MCP.
//!
//! Each prompt is a static guide that teaches an agent how to combine the
//! NetBox tools for common infrastructure questions.

use rmcp::model::Prompt;

/// Overview prompt covering the whole tool surface.
pub const OVERVIEW: &str = "netbox-mcp";

/// Guide for counting objects.
pub const GET_COUNT_OBJECTS: &str = "netbox_prompt_get_count_objects";

/// Guide for retrieving objects.
pub const GET_OBJECTS: &str = "netbox_prompt_get_objects";

/// Guide for querying changelogs.
pub const GET_CHANGELOGS: &str = "netbox_prompt_get_changelogs";

const OVERVIEW_TEXT: &str = r#"NetBox MCP server for querying and managing NetBox objects.

Available tools:

1. get_objects(object_type, filters) - list objects matching filters.
2. get_count_objects(object_type, filters) - count objects matching filters.
3. get_object_by_id(object_type, object_id) - full details of one object.
4. get_custom_fields(object_type, filters) - summarize custom field definitions.
5. get_changelogs(filters) - object change records.
6. get_current_time_iso() - start of the current UTC day, ISO 8601.
7. create_object(object_type, data) - create an object.
8. update_object(object_type, object_id, data) - PATCH an object.
9. delete_object(object_type, object_id) - delete an object.

Supported object type groups:
- DCIM: devices, interfaces, sites, racks, device-types, ...
- IPAM: ip-addresses, prefixes, vlans, vrfs, ...
- Circuits: circuits, providers, ...
- Virtualization: virtual-machines, clusters, vm-interfaces, ...
- Tenancy: tenants, contacts, ...
- VPN: tunnels, ike-policies, ...
- Wireless: wireless-lans, wireless-links, ...
- Extras: tags, custom-fields, webhooks, ...
- Core: changelogs, jobs, data-sources

Worked example - free space in rack H01 at site HCM:
1. get_objects("sites", {"name": "HCM"}) and take the site id.
2. get_objects("racks", {"name": "H01", "site_id": <site id>}); note the
   rack's u_height (default 42 when absent).
3. get_objects("devices", {"rack_id": <rack id>}); for each device fetch
   get_object_by_id("device-types", <device_type id>) and sum u_height
   (default 1 when absent).
4. Report (rack height - used height) / rack height as a percentage.

Other common sequences:
- Devices in a site: get_objects("sites", {"name": ...}) then
  get_objects("devices", {"site_id": <id>}).
- Update a device: get_objects("devices", {"name": ...}) to find its id,
  then update_object("devices", <id>, {"status": "maintenance"}).

Remember to:
- Validate object types before making requests.
- Check required fields before create_object.
- Use filters to narrow results.
- Consider the changelog impact of mutations."#;

const GET_COUNT_OBJECTS_TEXT: &str = r#"Use the get_count_objects tool to count NetBox objects by type and filters.

Examples:
1. Devices with a custom field value:
   get_count_objects("devices", {"cf_year_of_investment": "3/2022"})
2. All devices:
   get_count_objects("devices", {})
3. Virtual machines running a given platform (platforms represent
   operating systems in NetBox):
   - get_objects("platforms", {"name": "Ubuntu 24"}) and take the id.
   - get_count_objects("virtual-machines", {"platform_id": <id>})

Valid object types include devices, ip-addresses, vlans, prefixes, sites,
racks and the rest of the catalog; an invalid type returns the full list."#;

const GET_OBJECTS_TEXT: &str = r#"Use the get_objects tool to retrieve NetBox objects by type and filters.

Examples:
1. All devices:
   get_objects("devices", {})
2. Devices by custom field, falling back to a plain field:
   get_objects("devices", {"cf_year_of_investment": "3/2022"}), and if
   empty try get_objects("devices", {"year_of_investment": "3/2022"}).
3. Virtual machines running a given platform:
   - get_objects("platforms", {"name": "Ubuntu 24"}) and take the id.
   - get_objects("virtual-machines", {"platform_id": <id>})

Valid object types include devices, ip-addresses, vlans, prefixes, sites,
racks, virtual-machines and the rest of the catalog. See the NetBox API
documentation for per-type filtering options."#;

const GET_CHANGELOGS_TEXT: &str = r#"Use the get_changelogs tool to retrieve object change records from NetBox.

Examples:
1. All changelogs: get_changelogs({})
2. Changes to one device:
   get_changelogs({"changed_object_type": "dcim.device", "changed_object_id": 123})
3. Today's changes: call get_current_time_iso() for the day start, then
   get_changelogs({"time_after": <that timestamp>}).
4. Changes by a user: get_objects("users", {"username": "admin"}) for the
   id, then get_changelogs({"user": <id>}).
5. Only creations: get_changelogs({"action": "create"}).
6. Counting instead of listing: get_count_objects("changelogs", {...})
   with the same filters.

Filtering options:
- user_id / user: who made the change
- changed_object_type_id / changed_object_id: what changed
- object_repr: object representation (usually contains the name)
- action: create, update or delete
- time_before / time_after: ISO 8601 bounds
- q: search term against the object representation"#;

/// All prompts the server advertises.
pub fn all_prompts() -> Vec<Prompt> {
    vec![
        Prompt::new(
            OVERVIEW,
            Some("NetBox MCP server for managing NetBox objects"),
            None,
        ),
        Prompt::new(
            GET_COUNT_OBJECTS,
            Some("Count objects in NetBox based on their type and filters"),
            None,
        ),
        Prompt::new(
            GET_OBJECTS,
            Some("Retrieve objects from NetBox based on their type and filters"),
            None,
        ),
        Prompt::new(
            GET_CHANGELOGS,
            Some("Retrieve changelogs from NetBox based on filters"),
            None,
        ),
    ]
}

/// Look up the guide text for a prompt name.
pub fn prompt_text(name: &str) -> Option<&'static str> {
    match name {
        OVERVIEW => Some(OVERVIEW_TEXT),
        GET_COUNT_OBJECTS => Some(GET_COUNT_OBJECTS_TEXT),
        GET_OBJECTS => Some(GET_OBJECTS_TEXT),
        GET_CHANGELOGS => Some(GET_CHANGELOGS_TEXT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prompts_have_text() {
        let prompts = all_prompts();
        assert_eq!(prompts.len(), 4);
        for prompt in prompts {
            assert!(prompt_text(&prompt.name).is_some(), "{}", prompt.name);
        }
    }

    #[test]
    fn test_unknown_prompt_has_no_text() {
        assert!(prompt_text("netbox_prompt_unknown").is_none());
    }
}
