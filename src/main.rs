use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use studio_api::config::AppConfig;
use studio_api::db;
use studio_api::error::ApiError;
use studio_api::routes;
use studio_api::services::cart_store::{CartBackend, FileCartStore, MongoCartStore};
use studio_api::services::catalog_service::Catalog;
use studio_api::state::AppState;

fn to_io(e: ApiError) -> io::Error {
    io::Error::other(e.to_string())
}

async fn cart_backend(config: &AppConfig) -> Result<CartBackend, ApiError> {
    match &config.mongo_uri {
        Some(uri) => {
            let client = db::mongo::create_mongo_client(uri).await?;
            let store = MongoCartStore::new(&client, config.cart_storage_name.clone());
            Ok(CartBackend::Mongo { store, client })
        }
        None => {
            let store = FileCartStore::new(
                config.cart_storage_dir.clone(),
                config.cart_storage_name.clone(),
            );
            store.ensure_dir().await?;
            log::info!(
                "MONGODB_URI not set, keeping carts in {}",
                config.cart_storage_dir.display()
            );
            Ok(CartBackend::File(store))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env();
    let catalog = Catalog::load(config.catalog_path.as_deref())
        .await
        .map_err(to_io)?;
    let carts = cart_backend(&config).await.map_err(to_io)?;
    log::info!("Cart storage backend: {}", carts.name());

    let host = config.host.clone();
    let port = config.port;
    let state = web::Data::new(AppState::new(config, catalog, carts));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
