#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use uuid::Uuid;

use studio_api::config::AppConfig;
use studio_api::routes;
use studio_api::services::cart_service::CartDiscountPolicy;
use studio_api::services::cart_store::{CartBackend, FileCartStore};
use studio_api::services::catalog_service::Catalog;
use studio_api::state::AppState;

pub const WHATSAPP_LINK: &str = "https://wa.me/79001234567";

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(CartDiscountPolicy::NoProductDiscount)
    }

    /// Embedded catalog, carts in a fresh temp directory.
    pub fn with_policy(cart_discount: CartDiscountPolicy) -> Self {
        let cart_dir = std::env::temp_dir().join(format!("studio-api-it-{}", Uuid::new_v4()));
        let config = AppConfig {
            cart_storage_dir: cart_dir.clone(),
            whatsapp_link: WHATSAPP_LINK.to_string(),
            cart_discount,
            ..AppConfig::default()
        };
        let catalog = Catalog::embedded().expect("embedded catalog is valid");
        let carts = CartBackend::File(FileCartStore::new(cart_dir, config.cart_storage_name.clone()));

        Self {
            state: web::Data::new(AppState::new(config, catalog, carts)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}
