// Consul Agent API HTTP handlers

use actix_web::HttpResponse;
use serde_json::json;

/// GET /v1/agent/self
/// Minimal agent descriptor so Consul-SD consumers (e.g. Prometheus) can
/// bootstrap against the adapter.
pub async fn agent_self() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "Config": {
            "Datacenter": "dc1"
        }
    }))
}
