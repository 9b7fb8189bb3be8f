// Consul Health API HTTP handlers

use actix_web::{HttpResponse, web};

use crate::error::Result;
use crate::service::registration::RegistrationService;

use super::catalog::CONSUL_INDEX_HEADER;

/// GET /v1/health/service/{service}
/// Returns one health entry per registered instance. Checks are a static
/// restatement of the registration, not a liveness probe.
pub async fn get_service_health(
    registration: web::Data<RegistrationService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let service_name = path.into_inner();
    let change = registration.get_service_health(&service_name).await?;

    Ok(HttpResponse::Ok()
        .insert_header((CONSUL_INDEX_HEADER, change.last_modified.to_string()))
        .json(change.item))
}
