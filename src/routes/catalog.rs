use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::state::AppState;

pub async fn get_services(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.catalog.service_categories())
}

pub async fn get_cosmetics(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.catalog.cosmetics())
}

pub async fn get_calculator(data: web::Data<AppState>) -> impl Responder {
    let catalog = &data.catalog;
    HttpResponse::Ok().json(json!({
        "categories": catalog.calculator_categories(),
        "bundle_zone_id": catalog.bundle_zone_id(),
        "bundle_savings": catalog
            .bundle_components_price()
            .saturating_sub(catalog.bundle_zone().price),
    }))
}

pub async fn get_gift_certificates(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": crate::services::lead_service::GIFT_CERTIFICATE_NAME,
        "presets": data.catalog.gift_certificate_presets(),
    }))
}
