use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::time::Duration;

use crate::error::{ApiError, ApiResult};

/// Connects to the cart database. A failed ping is logged but not fatal.
pub async fn create_mongo_client(uri: &str) -> ApiResult<Client> {
    log::info!("Connecting to MongoDB for cart storage");

    let mut client_options = ClientOptions::parse(uri)
        .await
        .map_err(|e| ApiError::Config(format!("MONGODB_URI could not be parsed: {}", e)))?;

    client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client
        .database("Studio")
        .run_command(mongodb::bson::doc! {"ping": 1})
        .await
    {
        Ok(_) => log::info!("MongoDB ping succeeded"),
        Err(e) => {
            log::warn!("Connected to MongoDB but ping failed: {}", e);
            log::warn!("Cart requests will fail until the database is reachable");
        }
    }

    Ok(client)
}
