// Consul API data models
// These models match the response shapes of the Consul catalog and health
// APIs, rebuilt from Nacos discovery data.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::discovery::Instance;

/// Check status reported for every instance. The adapter does no liveness
/// probing: a listed registration is restated as "UP".
pub const STATUS_UP: &str = "UP";

/// Response envelope pairing a payload with the time it was assembled.
///
/// Consul clients drive blocking queries off a change index. The adapter has
/// no change tracking, so the index is the wall-clock time (milliseconds
/// since epoch) at response construction. The HTTP layer surfaces it as the
/// `X-Consul-Index` header.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeItem<T> {
    pub item: T,
    #[serde(rename = "lastModified")]
    pub last_modified: i64,
}

impl<T> ChangeItem<T> {
    /// Wrap a payload with the current timestamp.
    pub fn now(item: T) -> Self {
        Self {
            item,
            last_modified: Utc::now().timestamp_millis(),
        }
    }
}

/// Catalog service entry (response for /v1/catalog/service/:service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogService {
    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "ServiceAddress")]
    pub service_address: String,

    #[serde(rename = "ServiceName")]
    pub service_name: String,

    #[serde(rename = "ServiceID")]
    pub service_id: String,

    #[serde(rename = "ServicePort")]
    pub service_port: u16,

    #[serde(rename = "NodeMeta")]
    pub node_meta: HashMap<String, String>,

    #[serde(rename = "ServiceMeta")]
    pub service_meta: HashMap<String, String>,

    #[serde(rename = "ServiceTags")]
    pub service_tags: Vec<String>,
}

impl CatalogService {
    /// Flatten a registry instance into the catalog shape.
    ///
    /// `ServiceMeta` carries only the synthesized `management.port` key; the
    /// instance's own metadata is not copied here. The health mapping does
    /// carry it, see [`ServiceHealth::from_instance`].
    pub fn from_instance(instance: &Instance) -> Self {
        Self {
            address: instance.host.clone(),
            node: instance.service_id.clone(),
            service_address: instance.host.clone(),
            service_name: instance.service_id.clone(),
            service_id: format!("{}:{}", instance.host, instance.port),
            service_port: instance.port,
            node_meta: HashMap::new(),
            service_meta: HashMap::from([(
                "management.port".to_string(),
                instance.port.to_string(),
            )]),
            service_tags: Vec::new(),
        }
    }
}

/// Service health entry (response for /v1/health/service/:service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    #[serde(rename = "Node")]
    pub node: Node,

    #[serde(rename = "Service")]
    pub service: Service,

    #[serde(rename = "Checks")]
    pub checks: Vec<Check>,
}

/// Node information in a health response. The instance's service name doubles
/// as the node name, matching the catalog mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "Node")]
    pub name: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Meta")]
    pub meta: HashMap<String, String>,
}

/// Service information in a health response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Service")]
    pub service: String,

    #[serde(rename = "Tags")]
    pub tags: Vec<String>,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Meta")]
    pub meta: HashMap<String, String>,

    #[serde(rename = "Port")]
    pub port: u16,
}

/// Health check information in a health response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "CheckID")]
    pub check_id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Status")]
    pub status: String,
}

impl ServiceHealth {
    /// Restate a registry instance as a health entry with a single static
    /// "UP" check. Unlike the catalog mapping, the instance's full metadata
    /// flows into both node and service meta.
    pub fn from_instance(instance: &Instance) -> Self {
        let node = Node {
            name: instance.service_id.clone(),
            address: instance.host.clone(),
            meta: instance.metadata.clone(),
        };
        let service = Service {
            id: instance.service_id.clone(),
            service: instance.service_id.clone(),
            tags: Vec::new(),
            address: instance.host.clone(),
            meta: instance.metadata.clone(),
            port: instance.port,
        };
        let check = Check {
            node: instance.service_id.clone(),
            check_id: format!("service:{}", instance.service_id),
            name: format!("Service '{}' check", instance.service_id),
            status: STATUS_UP.to_string(),
        };
        Self {
            node,
            service,
            checks: vec![check],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance {
            host: "10.0.0.1".to_string(),
            port: 8080,
            service_id: "orders".to_string(),
            metadata: HashMap::from([("zone".to_string(), "eu-1".to_string())]),
        }
    }

    #[test]
    fn test_catalog_service_mapping() {
        let record = CatalogService::from_instance(&instance());

        assert_eq!(record.address, "10.0.0.1");
        assert_eq!(record.service_address, "10.0.0.1");
        assert_eq!(record.node, "orders");
        assert_eq!(record.service_name, "orders");
        assert_eq!(record.service_id, "10.0.0.1:8080");
        assert_eq!(record.service_port, 8080);
        assert!(record.node_meta.is_empty());
        assert!(record.service_tags.is_empty());
        // Only the synthesized port key, never the instance metadata
        assert_eq!(record.service_meta.len(), 1);
        assert_eq!(
            record.service_meta.get("management.port"),
            Some(&"8080".to_string())
        );
    }

    #[test]
    fn test_catalog_service_field_names() {
        let value = serde_json::to_value(CatalogService::from_instance(&instance())).unwrap();
        let object = value.as_object().unwrap();

        for field in [
            "Address",
            "Node",
            "ServiceAddress",
            "ServiceName",
            "ServiceID",
            "ServicePort",
            "NodeMeta",
            "ServiceMeta",
            "ServiceTags",
        ] {
            assert!(object.contains_key(field), "missing field {}", field);
        }
        assert_eq!(object.len(), 9);
    }

    #[test]
    fn test_service_health_mapping() {
        let health = ServiceHealth::from_instance(&instance());

        assert_eq!(health.node.name, "orders");
        assert_eq!(health.node.address, "10.0.0.1");
        assert_eq!(health.node.meta.get("zone"), Some(&"eu-1".to_string()));

        assert_eq!(health.service.id, "orders");
        assert_eq!(health.service.service, "orders");
        assert_eq!(health.service.address, "10.0.0.1");
        assert_eq!(health.service.port, 8080);
        assert!(health.service.tags.is_empty());
        assert_eq!(health.service.meta.get("zone"), Some(&"eu-1".to_string()));

        assert_eq!(health.checks.len(), 1);
        let check = &health.checks[0];
        assert_eq!(check.node, "orders");
        assert_eq!(check.check_id, "service:orders");
        assert_eq!(check.name, "Service 'orders' check");
        assert_eq!(check.status, STATUS_UP);
    }

    #[test]
    fn test_service_health_field_names() {
        let value = serde_json::to_value(ServiceHealth::from_instance(&instance())).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("Node"));
        assert!(object.contains_key("Service"));
        assert!(object.contains_key("Checks"));

        let check = &value["Checks"][0];
        assert_eq!(check["CheckID"], "service:orders");
        assert_eq!(check["Status"], "UP");
    }

    #[test]
    fn test_change_item_serialization() {
        let change = ChangeItem {
            item: vec!["orders".to_string()],
            last_modified: 1700000000000,
        };
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["lastModified"], 1700000000000i64);
        assert_eq!(value["item"][0], "orders");
    }
}
