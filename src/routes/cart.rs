use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::cart::{AddToCartRequest, CartItem, CartView, QuantityUpdate};
use crate::models::lead::CheckoutRequest;
use crate::services::cart_service::CartService;
use crate::services::cart_store::{parse_session, CartStore};
use crate::services::lead_service;
use crate::state::AppState;

fn view(data: &AppState, session: &Uuid, items: Vec<CartItem>) -> ApiResult<CartView> {
    Ok(CartView {
        session: session.to_string(),
        item_count: CartService::item_count(&items)?,
        totals: CartService::totals(&items, data.config.cart_discount)?,
        hint: CartService::hint(&items),
        items,
    })
}

/// Starts an empty cart and returns its session id.
pub async fn create_cart(data: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let session = Uuid::new_v4();
    data.carts.save(&session, &[]).await?;
    log::info!("Created cart {}", session);
    Ok(HttpResponse::Created().json(view(&data, &session, Vec::new())?))
}

pub async fn get_cart(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let session = parse_session(&path.into_inner())?;
    let items = data.carts.load(&session).await?;
    Ok(HttpResponse::Ok().json(view(&data, &session, items)?))
}

pub async fn add_item(
    data: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<AddToCartRequest>,
) -> ApiResult<HttpResponse> {
    let session = parse_session(&path.into_inner())?;
    let item = CartService::build_item(&data.catalog, &input)?;

    let mut items = data.carts.load(&session).await?;
    CartService::add_item(&mut items, item)?;
    // Only carts that can still be priced are written back
    let cart = view(&data, &session, items)?;
    data.carts.save(&session, &cart.items).await?;

    Ok(HttpResponse::Ok().json(cart))
}

pub async fn update_quantity(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    input: web::Json<QuantityUpdate>,
) -> ApiResult<HttpResponse> {
    let (session, item_id) = path.into_inner();
    let session = parse_session(&session)?;

    let mut items = data.carts.load(&session).await?;
    if !CartService::update_quantity(&mut items, &item_id, input.quantity)? {
        return Err(ApiError::NotFound(format!("Cart item '{}'", item_id)));
    }
    let cart = view(&data, &session, items)?;
    data.carts.save(&session, &cart.items).await?;

    Ok(HttpResponse::Ok().json(cart))
}

pub async fn remove_item(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (session, item_id) = path.into_inner();
    let session = parse_session(&session)?;

    let mut items = data.carts.load(&session).await?;
    if !CartService::remove_item(&mut items, &item_id) {
        return Err(ApiError::NotFound(format!("Cart item '{}'", item_id)));
    }
    let cart = view(&data, &session, items)?;
    data.carts.save(&session, &cart.items).await?;

    Ok(HttpResponse::Ok().json(cart))
}

pub async fn clear_cart(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let session = parse_session(&path.into_inner())?;
    data.carts.clear(&session).await?;
    Ok(HttpResponse::Ok().json(view(&data, &session, Vec::new())?))
}

/// Builds the WhatsApp order for the whole cart. The cart is left as is.
pub async fn checkout(
    data: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<CheckoutRequest>,
) -> ApiResult<HttpResponse> {
    let session = parse_session(&path.into_inner())?;
    let items = data.carts.load(&session).await?;
    let totals = CartService::totals(&items, data.config.cart_discount)?;

    let lead = lead_service::cart_lead(
        &input.contact,
        &items,
        totals.total,
        &data.config.whatsapp_link,
    )?;
    log::info!("Cart {} handed off with {} lines", session, items.len());
    Ok(HttpResponse::Ok().json(lead))
}
