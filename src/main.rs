use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nacos_consul_adapter::api::route::consul_routes;
use nacos_consul_adapter::discovery::{DiscoveryClient, NacosConfig, NacosDiscoveryClient};
use nacos_consul_adapter::service::registration::RegistrationService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Config::builder()
        .add_source(config::File::with_name("conf/application.yml").required(false))
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let address = settings
        .get_string("server.address")
        .unwrap_or_else(|_| "0.0.0.0".to_string());
    let server_port = settings.get_int("server.port").unwrap_or(8500) as u16;

    let mut nacos_config = NacosConfig::new(
        &settings
            .get_string("nacos.server-addr")
            .unwrap_or_else(|_| "http://127.0.0.1:8848".to_string()),
    );
    if let Ok(namespace_id) = settings.get_string("nacos.namespace") {
        nacos_config.namespace_id = Some(namespace_id);
    }
    if let Ok(context_path) = settings.get_string("nacos.context-path") {
        nacos_config.context_path = context_path;
    }

    info!(
        server_addr = %nacos_config.server_addr,
        %address,
        server_port,
        "starting nacos-consul-adapter"
    );

    let discovery: Arc<dyn DiscoveryClient> = Arc::new(
        NacosDiscoveryClient::new(nacos_config)
            .map_err(|e| std::io::Error::other(e.to_string()))?,
    );
    let registration = web::Data::new(RegistrationService::new(discovery));

    HttpServer::new(move || {
        App::new()
            .app_data(registration.clone())
            .service(consul_routes())
    })
    .bind((address, server_port))?
    .run()
    .await
}
