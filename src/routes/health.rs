use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use url::Url;

use crate::services::cart_store::CartBackend;
use crate::services::cart_service::CartDiscountPolicy;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: String) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details),
        }
    }

    fn error(details: String) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details),
        }
    }
}

pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    health
        .services
        .insert("catalog".to_string(), check_catalog(&data));
    health
        .services
        .insert("cart_storage".to_string(), check_cart_storage(&data.carts).await);
    health
        .services
        .insert("whatsapp".to_string(), check_whatsapp_link(&data.config.whatsapp_link));

    // Any failing dependency degrades the overall status
    if health.services.values().any(|s| s.status != "ok") {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_catalog(data: &AppState) -> ServiceStatus {
    let catalog = &data.catalog;
    let services: usize = catalog
        .service_categories()
        .iter()
        .map(|c| c.services.len())
        .sum();
    let zones = catalog.zones().count();

    if zones == 0 {
        return ServiceStatus::error("Calculator catalog has no zones".to_string());
    }

    let cosmetics_policy = match data.config.cart_discount {
        CartDiscountPolicy::NoProductDiscount => "no cosmetics discount".to_string(),
        CartDiscountPolicy::CrossCategory { percent } => {
            format!("{}% off cosmetics with a service", percent)
        }
    };

    ServiceStatus::ok(format!(
        "{} services, {} zones, {}",
        services, zones, cosmetics_policy
    ))
}

async fn check_cart_storage(carts: &CartBackend) -> ServiceStatus {
    match carts.check().await {
        Ok(()) => ServiceStatus::ok(format!("Cart storage '{}' reachable", carts.name())),
        Err(e) => {
            // Log error for internal visibility
            log::error!("Cart storage health check failed: {}", e);
            ServiceStatus::error(format!("Cart storage '{}' failed: {}", carts.name(), e))
        }
    }
}

fn check_whatsapp_link(link: &str) -> ServiceStatus {
    match Url::parse(link) {
        Ok(url) if url.scheme() == "https" => ServiceStatus::ok(format!(
            "Messaging link configured ({})",
            url.host_str().unwrap_or("unknown host")
        )),
        Ok(url) => ServiceStatus::error(format!(
            "Messaging link must use https, got '{}'",
            url.scheme()
        )),
        Err(e) => ServiceStatus::error(format!("WHATSAPP_LINK is not a valid URL: {}", e)),
    }
}
