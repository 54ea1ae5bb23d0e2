use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog_service::catalog::CatalogService;
use catalog_service::config::Config;
use catalog_service::contact::{ContactRelay, SheetWebhook};
use catalog_service::db::MongoCatalogRepo;
use catalog_service::handlers;
use catalog_service::redis_pub::RedisPublisher;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let repo = MongoCatalogRepo::connect(&config.mongodb_uri, &config.database).await?;
    let catalog = web::Data::new(CatalogService::new(Arc::new(repo)));
    let relay = web::Data::new(ContactRelay::new(Arc::new(SheetWebhook::new(
        config.contact_webhook_url.clone(),
    ))));

    let redis_pub = match &config.redis_url {
        Some(url) => RedisPublisher::new(url).await.unwrap_or_else(|e| {
            warn!("Failed to connect to Redis: {:?}", e);
            RedisPublisher::new_noop()
        }),
        None => RedisPublisher::new_noop(),
    };
    if redis_pub.is_noop() {
        warn!("Event publishing disabled, using no-op publisher");
    }
    let redis_pub = web::Data::new(redis_pub);

    info!("Catalog service running on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(catalog.clone())
            .app_data(relay.clone())
            .app_data(redis_pub.clone())
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
