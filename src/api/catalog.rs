// Consul Catalog API HTTP handlers

use actix_web::{HttpResponse, web};

use crate::error::Result;
use crate::service::registration::RegistrationService;

use super::model::BlockingQueryParams;

pub const CONSUL_INDEX_HEADER: &str = "X-Consul-Index";

/// GET /v1/catalog/services
/// Returns the map of registered service names to their (empty) tag lists.
pub async fn list_services(
    registration: web::Data<RegistrationService>,
    query: web::Query<BlockingQueryParams>,
) -> Result<HttpResponse> {
    let change = registration
        .get_service_names(query.wait_millis(), query.index)
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((CONSUL_INDEX_HEADER, change.last_modified.to_string()))
        .json(change.item))
}

/// GET /v1/catalog/service/{service}
/// Returns the deduplicated catalog entries for one service.
pub async fn get_service(
    registration: web::Data<RegistrationService>,
    path: web::Path<String>,
    query: web::Query<BlockingQueryParams>,
) -> Result<HttpResponse> {
    let service_name = path.into_inner();
    let change = registration
        .get_service_instances(&service_name, query.wait_millis(), query.index)
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((CONSUL_INDEX_HEADER, change.last_modified.to_string()))
        .json(change.item))
}
