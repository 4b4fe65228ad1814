use std::{env, path::PathBuf};

use crate::services::cart_service::CartDiscountPolicy;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const CART_STORAGE_NAME: &str = "cart";
const CART_STORAGE_DIR: &str = "data/carts";
const WHATSAPP_LINK: &str = "https://wa.me/79000000000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: Option<String>,
    pub cart_storage_name: String,
    pub cart_storage_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub whatsapp_link: String,
    pub cart_discount: CartDiscountPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongo_uri: None,
            cart_storage_name: CART_STORAGE_NAME.to_string(),
            cart_storage_dir: PathBuf::from(CART_STORAGE_DIR),
            catalog_path: None,
            whatsapp_link: WHATSAPP_LINK.to_string(),
            cart_discount: CartDiscountPolicy::NoProductDiscount,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("PORT={} is not a valid port, using {}", raw, PORT);
                PORT
            }),
            Err(_) => PORT,
        };

        let cart_discount = match env::var("CART_PRODUCT_DISCOUNT_PERCENT") {
            Ok(raw) => match raw.parse::<u32>() {
                Ok(0) => CartDiscountPolicy::NoProductDiscount,
                Ok(percent) if percent <= 100 => CartDiscountPolicy::CrossCategory { percent },
                _ => {
                    log::warn!(
                        "CART_PRODUCT_DISCOUNT_PERCENT={} is not a percentage, cosmetics discount disabled",
                        raw
                    );
                    CartDiscountPolicy::NoProductDiscount
                }
            },
            Err(_) => defaults.cart_discount,
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            mongo_uri: env::var("MONGODB_URI").ok().filter(|uri| !uri.is_empty()),
            cart_storage_name: env::var("CART_STORAGE_NAME").unwrap_or(defaults.cart_storage_name),
            cart_storage_dir: env::var("CART_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cart_storage_dir),
            catalog_path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
            whatsapp_link: env::var("WHATSAPP_LINK").unwrap_or(defaults.whatsapp_link),
            cart_discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_discount_policy_from_env() {
        env::set_var("CART_PRODUCT_DISCOUNT_PERCENT", "10");
        assert_eq!(
            AppConfig::from_env().cart_discount,
            CartDiscountPolicy::CrossCategory { percent: 10 }
        );

        env::set_var("CART_PRODUCT_DISCOUNT_PERCENT", "0");
        assert_eq!(
            AppConfig::from_env().cart_discount,
            CartDiscountPolicy::NoProductDiscount
        );

        env::set_var("CART_PRODUCT_DISCOUNT_PERCENT", "lots");
        assert_eq!(
            AppConfig::from_env().cart_discount,
            CartDiscountPolicy::NoProductDiscount
        );
        env::remove_var("CART_PRODUCT_DISCOUNT_PERCENT");
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        env::set_var("PORT", "not-a-port");
        assert_eq!(AppConfig::from_env().port, PORT);
        env::remove_var("PORT");
    }
}
