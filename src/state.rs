use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::cart_store::CartBackend;
use crate::services::catalog_service::Catalog;

/// Shared by every worker through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub carts: CartBackend,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog, carts: CartBackend) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
            carts,
        }
    }
}
