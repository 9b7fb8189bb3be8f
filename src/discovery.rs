//! Outbound discovery capability backed by the Nacos open API.
//!
//! The adapter only needs a read-side view of the registry: the full list of
//! service names and the instances registered under one name. The
//! [`DiscoveryClient`] trait captures exactly that, and
//! [`NacosDiscoveryClient`] implements it over the Nacos v1 HTTP API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AdapterError, Result};

/// A single registered network endpoint for a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub host: String,
    pub port: u16,
    /// Logical service name. Downstream mappings use it both as node name
    /// and service name, matching the upstream Consul adapters.
    pub service_id: String,
    pub metadata: HashMap<String, String>,
}

impl Instance {
    /// Identity key for set deduplication. Two registrations with the same
    /// host, port and service name are the same instance.
    pub fn identity(&self) -> String {
        format!("{}:{}:{}", self.host, self.port, self.service_id)
    }
}

/// Read-side view of a service registry.
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    /// All registered service names.
    async fn list_services(&self) -> Result<Vec<String>>;

    /// Instances registered under `service_name`. A name with no
    /// registrations yields an empty list, never an error.
    async fn list_instances(&self, service_name: &str) -> Result<Vec<Instance>>;
}

/// Configuration for the Nacos discovery client.
#[derive(Clone, Debug)]
pub struct NacosConfig {
    /// Server address, e.g. "http://127.0.0.1:8848"
    pub server_addr: String,
    /// Context path (e.g. "/nacos")
    pub context_path: String,
    /// Namespace to query, server default when absent
    pub namespace_id: Option<String>,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
    /// Page size for the service list endpoint
    pub page_size: u32,
}

impl Default for NacosConfig {
    fn default() -> Self {
        Self {
            server_addr: "http://127.0.0.1:8848".to_string(),
            context_path: "/nacos".to_string(),
            namespace_id: None,
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            page_size: 1000,
        }
    }
}

impl NacosConfig {
    /// Create a new config with a single server address
    pub fn new(server_addr: &str) -> Self {
        Self {
            server_addr: server_addr.to_string(),
            ..Default::default()
        }
    }
}

/// Nacos v1 open-API discovery client.
pub struct NacosDiscoveryClient {
    client: Client,
    config: NacosConfig,
}

/// Response of GET /v1/ns/service/list
#[derive(Debug, Deserialize)]
struct ServiceListResponse {
    #[serde(default)]
    doms: Vec<String>,
    #[serde(default)]
    count: i64,
}

/// Response of GET /v1/ns/instance/list
#[derive(Debug, Deserialize)]
struct InstanceListResponse {
    #[serde(default)]
    hosts: Vec<NacosHost>,
}

#[derive(Debug, Deserialize)]
struct NacosHost {
    ip: String,
    port: u16,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl NacosDiscoveryClient {
    pub fn new(config: NacosConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()
            .map_err(AdapterError::Backend)?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.config.server_addr.trim_end_matches('/'),
            self.config.context_path,
            path
        )
    }
}

#[async_trait]
impl DiscoveryClient for NacosDiscoveryClient {
    async fn list_services(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        let mut page_no = 1u32;

        loop {
            let mut query = vec![
                ("pageNo", page_no.to_string()),
                ("pageSize", self.config.page_size.to_string()),
            ];
            if let Some(namespace_id) = &self.config.namespace_id {
                query.push(("namespaceId", namespace_id.clone()));
            }

            let response = self
                .client
                .get(self.url("/v1/ns/service/list"))
                .query(&query)
                .send()
                .await?;
            let response = check_status(response).await?;
            let body: ServiceListResponse = response.json().await?;

            let fetched = body.doms.len();
            names.extend(body.doms);

            if fetched == 0 || names.len() as i64 >= body.count {
                break;
            }
            page_no += 1;
        }

        debug!(count = names.len(), "fetched service list");
        Ok(names)
    }

    async fn list_instances(&self, service_name: &str) -> Result<Vec<Instance>> {
        let mut query = vec![("serviceName", service_name.to_string())];
        if let Some(namespace_id) = &self.config.namespace_id {
            query.push(("namespaceId", namespace_id.clone()));
        }

        let response = self
            .client
            .get(self.url("/v1/ns/instance/list"))
            .query(&query)
            .send()
            .await?;

        // An unknown service name is a valid empty result, not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            debug!(service_name, "service not registered, returning empty list");
            return Ok(Vec::new());
        }

        let response = check_status(response).await?;
        let body: InstanceListResponse = response.json().await?;

        Ok(body
            .hosts
            .into_iter()
            .map(|host| Instance {
                host: host.ip,
                port: host.port,
                service_id: service_name.to_string(),
                metadata: host.metadata,
            })
            .collect())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(AdapterError::BackendStatus { status, body })
}
