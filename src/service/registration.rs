// Registration query service
// Reshapes Nacos discovery data into Consul catalog and health responses.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::discovery::{DiscoveryClient, Instance};
use crate::error::Result;
use crate::model::{CatalogService, ChangeItem, ServiceHealth};

/// Answers Consul-style catalog and health queries from the discovery
/// backend.
///
/// Stateless: every call re-queries the backend and builds a fresh response.
/// The blocking-query parameters (`wait_millis`, `index`) are accepted for
/// Consul API compatibility and ignored; every call completes immediately.
/// Honoring them would need a change-version counter from the backend, which
/// the Nacos open API does not expose for these queries.
pub struct RegistrationService {
    discovery: Arc<dyn DiscoveryClient>,
}

impl RegistrationService {
    pub fn new(discovery: Arc<dyn DiscoveryClient>) -> Self {
        Self { discovery }
    }

    /// All distinct registered service names, each mapped to an empty tag
    /// list (tags only exist for schema compatibility).
    pub async fn get_service_names(
        &self,
        wait_millis: u64,
        index: Option<i64>,
    ) -> Result<ChangeItem<HashMap<String, Vec<String>>>> {
        trace!(wait_millis, ?index, "catalog services query");
        let names = self.discovery.list_services().await?;
        let result: HashMap<String, Vec<String>> =
            names.into_iter().map(|name| (name, Vec::new())).collect();
        Ok(ChangeItem::now(result))
    }

    /// Deduplicated catalog entries for `app_name`. Output order is
    /// unspecified; callers must not rely on it.
    pub async fn get_service_instances(
        &self,
        app_name: &str,
        wait_millis: u64,
        index: Option<i64>,
    ) -> Result<ChangeItem<Vec<CatalogService>>> {
        trace!(app_name, wait_millis, ?index, "catalog service query");
        let instances = self.discovery.list_instances(app_name).await?;
        let records = dedup(instances)
            .iter()
            .map(CatalogService::from_instance)
            .collect();
        Ok(ChangeItem::now(records))
    }

    /// Health view for `app_name`: one entry per distinct instance, each
    /// carrying a single static "UP" check that restates the registration.
    pub async fn get_service_health(
        &self,
        app_name: &str,
    ) -> Result<ChangeItem<Vec<ServiceHealth>>> {
        trace!(app_name, "health service query");
        let instances = self.discovery.list_instances(app_name).await?;
        let records = dedup(instances)
            .iter()
            .map(ServiceHealth::from_instance)
            .collect();
        Ok(ChangeItem::now(records))
    }
}

/// Set-semantics deduplication keyed by host + port + service id. The first
/// registration for an identity wins; result order is unspecified.
fn dedup(instances: Vec<Instance>) -> Vec<Instance> {
    let mut seen: HashMap<String, Instance> = HashMap::new();
    for instance in instances {
        seen.entry(instance.identity()).or_insert(instance);
    }
    seen.into_values().collect()
}
