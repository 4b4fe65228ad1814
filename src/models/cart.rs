use serde::{Deserialize, Serialize};

use crate::models::catalog::{CosmeticProduct, Rubles, Service};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CartItemType {
    Service,
    Product,
}

/// One cart line. Services carry their final line price and quantity 1,
/// products carry a unit price and a quantity.
///
/// Field names follow the layout the site already keeps in local storage so
/// existing saved carts stay readable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub details: String,
    pub price: Rubles,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub item_type: CartItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ref: Option<CosmeticProduct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ref: Option<Service>,
}

impl CartItem {
    pub fn is_service(&self) -> bool {
        self.item_type == CartItemType::Service
    }

    pub fn is_product(&self) -> bool {
        self.item_type == CartItemType::Product
    }

    /// `None` when unit price times quantity does not fit in [`Rubles`].
    pub fn line_total(&self) -> Option<Rubles> {
        match self.item_type {
            CartItemType::Service => Some(self.price),
            CartItemType::Product => self.price.checked_mul(self.quantity),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    #[default]
    Session,
    Course,
}

/// What the client wants to put in the cart; the line itself is built from
/// the catalog so prices cannot be supplied by the client.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AddToCartRequest {
    Service {
        service_id: String,
        #[serde(default)]
        purchase: PurchaseType,
        sessions: Option<u32>,
    },
    Product {
        brand_id: String,
        product_name: String,
        size: String,
    },
}

#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CartTotals {
    pub services_subtotal: Rubles,
    pub products_subtotal: Rubles,
    pub products_discount: Rubles,
    pub total: Rubles,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CartView {
    pub session: String,
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub totals: CartTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Price breakdown for one service, either a single visit or a course.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServiceOffer {
    pub service_id: String,
    pub purchase: PurchaseType,
    pub sessions: u32,
    pub price_per_session: Rubles,
    pub total: Rubles,
    pub savings: Rubles,
}

#[derive(Debug, Deserialize)]
pub struct OfferRequest {
    #[serde(default)]
    pub purchase: PurchaseType,
    pub sessions: Option<u32>,
}
