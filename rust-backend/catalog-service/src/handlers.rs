use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{info, warn};

use crate::catalog::CatalogService;
use crate::contact::{ContactRelay, ContactRequest};
use crate::errors::ApiError;
use crate::filters::{CatalogFilter, FilterQuery};
use crate::models::CatalogEvent;
use crate::redis_pub::{RedisPublisher, BRAND_VIEWED, CONTACT_SUBMITTED, PRODUCT_VIEWED};
use crate::response::ApiResponse;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // more specific routes before less specific
    cfg.route("/health", web::get().to(health))
        .route("/catalog", web::get().to(listing))
        .route("/products", web::get().to(list_products))
        .route("/products/{slug}/related", web::get().to(get_related_products))
        .route("/products/{slug}", web::get().to(get_product))
        .route("/brands", web::get().to(list_brands))
        .route("/brands/{slug}", web::get().to(get_brand))
        .route("/categories", web::get().to(list_categories))
        .service(
            web::resource("/contact")
                .app_data(web::JsonConfig::default().error_handler(contact_payload_error))
                .route(web::post().to(submit_contact)),
        );
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(json!({"status": "ok"})))
}

pub async fn list_products(
    catalog: web::Data<CatalogService>,
    query: web::Query<FilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = CatalogFilter::from_query(&query);
    let products = catalog
        .list_products(&filter)
        .await
        .map_err(|e| e.into_api("Failed to fetch products"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(products)))
}

pub async fn get_product(
    catalog: web::Data<CatalogService>,
    redis_pub: web::Data<RedisPublisher>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();
    let detail = catalog
        .product_detail(&slug)
        .await
        .map_err(|e| e.into_api("Failed to fetch product"))?;

    let event = CatalogEvent::new(PRODUCT_VIEWED, Some(slug), Some(detail.product.name.clone()));
    if let Err(e) = redis_pub.publish(PRODUCT_VIEWED, &event).await {
        warn!("Redis publish error ({}): {:?}", PRODUCT_VIEWED, e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

pub async fn get_related_products(
    catalog: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let related = catalog
        .related_products(&path)
        .await
        .map_err(|e| e.into_api("Failed to fetch product"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(related)))
}

pub async fn list_brands(catalog: web::Data<CatalogService>) -> Result<HttpResponse, ApiError> {
    let brands = catalog
        .list_brands()
        .await
        .map_err(|e| e.into_api("Failed to fetch brands"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(brands)))
}

pub async fn get_brand(
    catalog: web::Data<CatalogService>,
    redis_pub: web::Data<RedisPublisher>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();
    let page = catalog
        .brand_page(&slug)
        .await
        .map_err(|e| e.into_api("Failed to fetch brand"))?;

    let event = CatalogEvent::new(BRAND_VIEWED, Some(slug), Some(page.brand.name.clone()));
    if let Err(e) = redis_pub.publish(BRAND_VIEWED, &event).await {
        warn!("Redis publish error ({}): {:?}", BRAND_VIEWED, e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

pub async fn list_categories(catalog: web::Data<CatalogService>) -> Result<HttpResponse, ApiError> {
    let categories = catalog
        .list_categories()
        .await
        .map_err(|e| e.into_api("Failed to fetch categories"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

pub async fn listing(
    catalog: web::Data<CatalogService>,
    query: web::Query<FilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = CatalogFilter::from_query(&query);
    let page = catalog
        .listing(&filter)
        .await
        .map_err(|e| e.into_api("Failed to fetch data"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

pub async fn submit_contact(
    relay: web::Data<ContactRelay>,
    redis_pub: web::Data<RedisPublisher>,
    req: web::Json<ContactRequest>,
) -> Result<HttpResponse, ApiError> {
    let (submission, payload) = relay.submit(req.into_inner()).await?;
    info!("contact form relayed for {}", submission.name);

    let event = CatalogEvent::new(CONTACT_SUBMITTED, None, Some(submission.name));
    if let Err(e) = redis_pub.publish(CONTACT_SUBMITTED, &event).await {
        warn!("Redis publish error ({}): {:?}", CONTACT_SUBMITTED, e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message("Form submitted successfully", payload)))
}

// an unreadable contact body is an internal error, not a 400
fn contact_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Internal(format!("contact payload: {}", err)).into()
}
