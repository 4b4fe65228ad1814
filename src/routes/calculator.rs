use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::models::calculator::{QuoteRequest, ToggleRequest};
use crate::models::cart::OfferRequest;
use crate::services::pricing_service::PricingService;
use crate::state::AppState;

/// Applies one zone toggle and returns the new selection.
pub async fn toggle_zone(
    data: web::Data<AppState>,
    input: web::Json<ToggleRequest>,
) -> ApiResult<HttpResponse> {
    let catalog = &data.catalog;
    let ToggleRequest { selection, zone_id } = input.into_inner();

    if catalog.zone(&zone_id).is_none() {
        return Err(ApiError::NotFound(format!("Zone '{}'", zone_id)));
    }

    let mut selection = selection.normalized(catalog.bundle_zone_id());
    selection.toggle(&zone_id, catalog.bundle_zone_id());

    Ok(HttpResponse::Ok().json(json!({ "selection": selection })))
}

pub async fn quote(
    data: web::Data<AppState>,
    input: web::Json<QuoteRequest>,
) -> ApiResult<HttpResponse> {
    let catalog = &data.catalog;
    let QuoteRequest { selection, flags } = input.into_inner();
    let selection = selection.normalized(catalog.bundle_zone_id());

    let result = PricingService::calculate(catalog, &selection, flags);
    let booking = PricingService::complex_booking(&result, flags);

    Ok(HttpResponse::Ok().json(json!({
        "selection": selection,
        "calculation": result,
        "booking": booking,
    })))
}

/// Single-visit or course price for one service.
pub async fn service_offer(
    data: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<OfferRequest>,
) -> ApiResult<HttpResponse> {
    let service_id = path.into_inner();
    let service = data
        .catalog
        .service(&service_id)
        .ok_or_else(|| ApiError::NotFound(format!("Service '{}'", service_id)))?;

    let offer = PricingService::service_offer(service, input.purchase, input.sessions)?;
    Ok(HttpResponse::Ok().json(offer))
}
