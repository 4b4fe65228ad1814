use actix_web::{web, HttpResponse};
use chrono::Local;

use crate::error::ApiResult;
use crate::models::lead::{BookingLeadRequest, GiftCertificateLeadRequest};
use crate::services::lead_service;
use crate::state::AppState;

pub async fn booking(
    data: web::Data<AppState>,
    input: web::Json<BookingLeadRequest>,
) -> ApiResult<HttpResponse> {
    let today = Local::now().date_naive();
    let lead = lead_service::booking_lead(&input, today, &data.config.whatsapp_link)?;
    log::info!("Booking lead prepared for '{}'", input.subject.name);
    Ok(HttpResponse::Ok().json(lead))
}

pub async fn gift_certificate(
    data: web::Data<AppState>,
    input: web::Json<GiftCertificateLeadRequest>,
) -> ApiResult<HttpResponse> {
    let lead = lead_service::gift_certificate_lead(
        &input.contact,
        input.amount,
        &data.config.whatsapp_link,
    )?;
    Ok(HttpResponse::Ok().json(lead))
}
