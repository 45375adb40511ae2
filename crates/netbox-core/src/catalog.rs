//! Catalog of NetBox object types.
//!
//! Maps the short object-type names agents use (`devices`, `prefixes`,
//! `changelogs`) to the NetBox API endpoints that serve them. The catalog
//! covers the DCIM, IPAM, Circuits, Virtualization, Tenancy, VPN, Wireless,
//! Extras and Core object groups.

/// All supported object types as `(name, api_endpoint)` pairs.
pub const OBJECT_TYPES: &[(&str, &str)] = &[
    // DCIM (devices and physical infrastructure)
    ("cables", "dcim/cables"),
    ("console-ports", "dcim/console-ports"),
    ("console-server-ports", "dcim/console-server-ports"),
    ("devices", "dcim/devices"),
    ("device-bays", "dcim/device-bays"),
    ("device-roles", "dcim/device-roles"),
    ("device-types", "dcim/device-types"),
    ("front-ports", "dcim/front-ports"),
    ("interfaces", "dcim/interfaces"),
    ("inventory-items", "dcim/inventory-items"),
    ("locations", "dcim/locations"),
    ("manufacturers", "dcim/manufacturers"),
    ("modules", "dcim/modules"),
    ("module-bays", "dcim/module-bays"),
    ("module-types", "dcim/module-types"),
    ("platforms", "dcim/platforms"),
    ("power-feeds", "dcim/power-feeds"),
    ("power-outlets", "dcim/power-outlets"),
    ("power-panels", "dcim/power-panels"),
    ("power-ports", "dcim/power-ports"),
    ("racks", "dcim/racks"),
    ("rack-reservations", "dcim/rack-reservations"),
    ("rack-roles", "dcim/rack-roles"),
    ("regions", "dcim/regions"),
    ("sites", "dcim/sites"),
    ("site-groups", "dcim/site-groups"),
    ("virtual-chassis", "dcim/virtual-chassis"),
    // IPAM (IP address management)
    ("asns", "ipam/asns"),
    ("asn-ranges", "ipam/asn-ranges"),
    ("aggregates", "ipam/aggregates"),
    ("fhrp-groups", "ipam/fhrp-groups"),
    ("ip-addresses", "ipam/ip-addresses"),
    ("ip-ranges", "ipam/ip-ranges"),
    ("prefixes", "ipam/prefixes"),
    ("rirs", "ipam/rirs"),
    ("roles", "ipam/roles"),
    ("route-targets", "ipam/route-targets"),
    ("services", "ipam/services"),
    ("vlans", "ipam/vlans"),
    ("vlan-groups", "ipam/vlan-groups"),
    ("vrfs", "ipam/vrfs"),
    // Circuits
    ("circuits", "circuits/circuits"),
    ("circuit-types", "circuits/circuit-types"),
    ("circuit-terminations", "circuits/circuit-terminations"),
    ("providers", "circuits/providers"),
    ("provider-networks", "circuits/provider-networks"),
    // Virtualization
    ("clusters", "virtualization/clusters"),
    ("cluster-groups", "virtualization/cluster-groups"),
    ("cluster-types", "virtualization/cluster-types"),
    ("virtual-machines", "virtualization/virtual-machines"),
    ("vm-interfaces", "virtualization/interfaces"),
    // Tenancy
    ("tenants", "tenancy/tenants"),
    ("tenant-groups", "tenancy/tenant-groups"),
    ("contacts", "tenancy/contacts"),
    ("contact-groups", "tenancy/contact-groups"),
    ("contact-roles", "tenancy/contact-roles"),
    // VPN
    ("ike-policies", "vpn/ike-policies"),
    ("ike-proposals", "vpn/ike-proposals"),
    ("ipsec-policies", "vpn/ipsec-policies"),
    ("ipsec-profiles", "vpn/ipsec-profiles"),
    ("ipsec-proposals", "vpn/ipsec-proposals"),
    ("l2vpns", "vpn/l2vpns"),
    ("tunnels", "vpn/tunnels"),
    ("tunnel-groups", "vpn/tunnel-groups"),
    // Wireless
    ("wireless-lans", "wireless/wireless-lans"),
    ("wireless-lan-groups", "wireless/wireless-lan-groups"),
    ("wireless-links", "wireless/wireless-links"),
    // Extras
    ("custom-links", "extras/custom-links"),
    ("custom-fields", "extras/custom-fields"),
    ("tags", "extras/tags"),
    ("export-templates", "extras/export-templates"),
    ("images-attachments", "extras/images-attachments"),
    ("save-filters", "extras/save-filters"),
    ("custom-field-choices", "extras/custom-field-choices"),
    ("webhooks", "extras/webhooks"),
    ("event-rules", "extras/event-rules"),
    ("object-types", "extras/object-types"),
    // Core
    ("data-sources", "core/data-sources"),
    ("changelogs", "core/object-changes"),
    ("jobs", "core/jobs"),
];

/// Endpoint served for object change records.
pub const CHANGELOG_ENDPOINT: &str = "core/object-changes";

/// Look up the API endpoint for an object type name.
pub fn endpoint_for(object_type: &str) -> Option<&'static str> {
    OBJECT_TYPES
        .iter()
        .find(|(name, _)| *name == object_type)
        .map(|(_, endpoint)| *endpoint)
}

/// All valid object type names, sorted.
pub fn valid_types() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = OBJECT_TYPES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_for_known_types() {
        assert_eq!(endpoint_for("devices"), Some("dcim/devices"));
        assert_eq!(endpoint_for("ip-addresses"), Some("ipam/ip-addresses"));
        assert_eq!(endpoint_for("changelogs"), Some("core/object-changes"));
        // VM interfaces live under a different endpoint name
        assert_eq!(
            endpoint_for("vm-interfaces"),
            Some("virtualization/interfaces")
        );
    }

    #[test]
    fn test_endpoint_for_unknown_type() {
        assert_eq!(endpoint_for("flux-capacitors"), None);
        assert_eq!(endpoint_for(""), None);
        // Endpoint paths are not valid object type names
        assert_eq!(endpoint_for("dcim/devices"), None);
    }

    #[test]
    fn test_valid_types_sorted_and_complete() {
        let names = valid_types();
        assert_eq!(names.len(), OBJECT_TYPES.len());
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"devices"));
        assert!(names.contains(&"wireless-links"));
    }

    #[test]
    fn test_no_duplicate_names() {
        let mut names: Vec<&str> = OBJECT_TYPES.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OBJECT_TYPES.len());
    }
}
