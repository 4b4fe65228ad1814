pub mod calculator;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod lead;

use actix_web::web;

/// Registers every route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/catalog")
                        .route("/services", web::get().to(catalog::get_services))
                        .route("/cosmetics", web::get().to(catalog::get_cosmetics))
                        .route("/calculator", web::get().to(catalog::get_calculator))
                        .route(
                            "/gift-certificates",
                            web::get().to(catalog::get_gift_certificates),
                        ),
                )
                .service(
                    web::scope("/calculator")
                        .route("/toggle", web::post().to(calculator::toggle_zone))
                        .route("/quote", web::post().to(calculator::quote)),
                )
                .route(
                    "/services/{id}/offer",
                    web::post().to(calculator::service_offer),
                )
                .service(
                    web::scope("/carts")
                        .route("", web::post().to(cart::create_cart))
                        .route("/{session}", web::get().to(cart::get_cart))
                        .route("/{session}", web::delete().to(cart::clear_cart))
                        .route("/{session}/items", web::post().to(cart::add_item))
                        .route(
                            "/{session}/items/{item_id}",
                            web::put().to(cart::update_quantity),
                        )
                        .route(
                            "/{session}/items/{item_id}",
                            web::delete().to(cart::remove_item),
                        )
                        .route("/{session}/checkout", web::post().to(cart::checkout)),
                )
                .service(
                    web::scope("/leads")
                        .route("/booking", web::post().to(lead::booking))
                        .route("/gift-certificate", web::post().to(lead::gift_certificate)),
                ),
        );
}
