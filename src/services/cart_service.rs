use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::cart::{AddToCartRequest, CartItem, CartItemType, CartTotals, PurchaseType};
use crate::models::catalog::Rubles;
use crate::services::catalog_service::Catalog;
use crate::services::pricing_service::PricingService;

/// Whether cosmetics get a discount when booked together with a service.
///
/// The manufacturer forbids discounting its products, so the default is
/// `NoProductDiscount`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CartDiscountPolicy {
    #[default]
    NoProductDiscount,
    /// `percent` off the products subtotal when the cart holds at least one
    /// service and one product.
    CrossCategory { percent: u32 },
}

/// Largest quantity a single product line may hold.
pub const MAX_PRODUCT_QUANTITY: u32 = 99;

fn too_large() -> ApiError {
    ApiError::BadRequest("Cart total is too large".to_string())
}

fn subtotal<'a>(mut lines: impl Iterator<Item = &'a CartItem>) -> ApiResult<Rubles> {
    lines.try_fold(0 as Rubles, |sum, item| {
        item.line_total()
            .and_then(|line| sum.checked_add(line))
            .ok_or_else(too_large)
    })
}

pub struct CartService;

impl CartService {
    /// Builds a cart line from the catalog.
    pub fn build_item(catalog: &Catalog, request: &AddToCartRequest) -> ApiResult<CartItem> {
        match request {
            AddToCartRequest::Service {
                service_id,
                purchase,
                sessions,
            } => {
                let service = catalog
                    .service(service_id)
                    .ok_or_else(|| ApiError::NotFound(format!("Service '{}'", service_id)))?;
                let offer = PricingService::service_offer(service, *purchase, *sessions)?;

                let (id_suffix, details) = match purchase {
                    PurchaseType::Course => (
                        format!("course-{}", offer.sessions),
                        format!("Курс из {} сеансов", offer.sessions),
                    ),
                    PurchaseType::Session => ("session".to_string(), "Разовый сеанс".to_string()),
                };

                Ok(CartItem {
                    id: format!("service-{}-{}", service.id, id_suffix),
                    name: service.title.clone(),
                    details,
                    price: offer.total,
                    quantity: 1,
                    item_type: CartItemType::Service,
                    product_ref: None,
                    service_ref: Some(service.clone()),
                })
            }
            AddToCartRequest::Product {
                brand_id,
                product_name,
                size,
            } => {
                let product = catalog
                    .product(brand_id, product_name)
                    .ok_or_else(|| ApiError::NotFound(format!("Product '{}'", product_name)))?;
                let variant = product.variant(size).ok_or_else(|| {
                    ApiError::NotFound(format!("Size '{}' of '{}'", size, product_name))
                })?;

                Ok(CartItem {
                    id: format!("product-{}-{}", product.name, variant.size),
                    name: product.name.clone(),
                    details: variant.size.clone(),
                    price: variant.price,
                    quantity: 1,
                    item_type: CartItemType::Product,
                    product_ref: Some(product.clone()),
                    service_ref: None,
                })
            }
        }
    }

    /// Adding a product that is already in the cart bumps its quantity;
    /// adding a service that is already there changes nothing.
    pub fn add_item(items: &mut Vec<CartItem>, item: CartItem) -> ApiResult<()> {
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) if existing.is_product() => {
                if existing.quantity >= MAX_PRODUCT_QUANTITY {
                    return Err(ApiError::BadRequest(format!(
                        "At most {} of '{}' per order",
                        MAX_PRODUCT_QUANTITY, existing.name
                    )));
                }
                existing.quantity += 1;
            }
            Some(_) => {}
            None => items.push(item),
        }
        Ok(())
    }

    /// Sets a product's quantity. Zero or less removes the line, whatever its type.
    /// Returns `false` if no line has `item_id`. Quantities above
    /// [`MAX_PRODUCT_QUANTITY`] are refused and leave `items` untouched.
    pub fn update_quantity(
        items: &mut Vec<CartItem>,
        item_id: &str,
        quantity: i64,
    ) -> ApiResult<bool> {
        let Some(position) = items.iter().position(|item| item.id == item_id) else {
            return Ok(false);
        };

        if quantity > i64::from(MAX_PRODUCT_QUANTITY) {
            return Err(ApiError::BadRequest(format!(
                "Quantity must be at most {}",
                MAX_PRODUCT_QUANTITY
            )));
        }

        if quantity <= 0 {
            items.remove(position);
        } else if items[position].is_product() {
            // Bounded by the check above
            items[position].quantity = quantity as u32;
        }
        Ok(true)
    }

    pub fn remove_item(items: &mut Vec<CartItem>, item_id: &str) -> bool {
        let before = items.len();
        items.retain(|item| item.id != item_id);
        items.len() != before
    }

    /// Header badge count: product units plus one per service line.
    pub fn item_count(items: &[CartItem]) -> ApiResult<u32> {
        items.iter().try_fold(0u32, |count, item| {
            let units = if item.is_product() { item.quantity } else { 1 };
            count.checked_add(units).ok_or_else(too_large)
        })
    }

    /// Fails with a bad request if any sum overflows, which only a tampered
    /// stored cart can reach.
    pub fn totals(items: &[CartItem], policy: CartDiscountPolicy) -> ApiResult<CartTotals> {
        let services_subtotal = subtotal(items.iter().filter(|item| item.is_service()))?;
        let products_subtotal = subtotal(items.iter().filter(|item| item.is_product()))?;

        let has_both = items.iter().any(CartItem::is_service) && items.iter().any(CartItem::is_product);
        let products_discount = match policy {
            CartDiscountPolicy::CrossCategory { percent } if has_both => {
                PricingService::percent_of(products_subtotal, percent)
            }
            _ => 0,
        };

        let total = services_subtotal
            .checked_add(products_subtotal - products_discount)
            .ok_or_else(too_large)?;

        Ok(CartTotals {
            services_subtotal,
            products_subtotal,
            products_discount,
            total,
        })
    }

    /// Cross-sell nudge shown above the cart totals.
    pub fn hint(items: &[CartItem]) -> Option<String> {
        let has_services = items.iter().any(CartItem::is_service);
        let has_products = items.iter().any(CartItem::is_product);

        match (has_services, has_products) {
            (false, true) => Some(
                "Добавьте услугу, и я помогу подобрать уход для продления эффекта!".to_string(),
            ),
            (true, false) => Some(
                "Не забудьте профессиональный уход, чтобы продлить эффект от процедуры."
                    .to_string(),
            ),
            _ => None,
        }
    }
}
