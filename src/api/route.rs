// Consul API route configuration
// Maps HTTP routes to handler functions

use actix_web::web;

use super::{agent, catalog, health};

/// Configure Consul Catalog API routes
pub fn consul_catalog_routes() -> actix_web::Scope {
    web::scope("/v1/catalog")
        // List all services
        .route("/services", web::get().to(catalog::list_services))
        // Get service instances
        .route("/service/{service}", web::get().to(catalog::get_service))
}

/// Configure Consul Health API routes
pub fn consul_health_routes() -> actix_web::Scope {
    web::scope("/v1/health").route(
        "/service/{service}",
        web::get().to(health::get_service_health),
    )
}

/// Configure Consul Agent API routes
pub fn consul_agent_routes() -> actix_web::Scope {
    web::scope("/v1/agent").route("/self", web::get().to(agent::agent_self))
}

/// Configure all Consul API routes
/// This is the main entry point for mounting the adapter into the server
pub fn consul_routes() -> actix_web::Scope {
    web::scope("")
        .service(consul_catalog_routes())
        .service(consul_health_routes())
        .service(consul_agent_routes())
}
