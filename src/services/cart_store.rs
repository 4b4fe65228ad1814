use std::io::ErrorKind;
use std::path::PathBuf;

use mongodb::{
    bson::{doc, DateTime},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::cart::CartItem;

/// Where carts are kept between requests.
///
/// Each cart is one JSON array of [`CartItem`]s stored under
/// `"{storage_name}-{session}"`.
pub trait CartStore {
    async fn load(&self, session: &Uuid) -> ApiResult<Vec<CartItem>>;
    async fn save(&self, session: &Uuid, items: &[CartItem]) -> ApiResult<()>;
    async fn clear(&self, session: &Uuid) -> ApiResult<()>;
}

fn storage_key(storage_name: &str, session: &Uuid) -> String {
    format!("{}-{}", storage_name, session)
}

/// Parses a stored cart. Unreadable data counts as an empty cart.
fn parse_cart(key: &str, raw: &str) -> Vec<CartItem> {
    match serde_json::from_str::<Vec<CartItem>>(raw) {
        Ok(items) => items,
        Err(e) => {
            log::error!("Failed to parse stored cart '{}': {}", key, e);
            Vec::new()
        }
    }
}

/// One JSON file per cart inside a directory.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
    storage_name: String,
}

impl FileCartStore {
    pub fn new(dir: impl Into<PathBuf>, storage_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            storage_name: storage_name.into(),
        }
    }

    fn path(&self, session: &Uuid) -> PathBuf {
        self.dir
            .join(format!("{}.json", storage_key(&self.storage_name, session)))
    }

    /// Checks that the directory exists or can be created.
    pub async fn ensure_dir(&self) -> ApiResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }
}

impl CartStore for FileCartStore {
    async fn load(&self, session: &Uuid) -> ApiResult<Vec<CartItem>> {
        match tokio::fs::read_to_string(self.path(session)).await {
            Ok(raw) => Ok(parse_cart(&storage_key(&self.storage_name, session), &raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &Uuid, items: &[CartItem]) -> ApiResult<()> {
        self.ensure_dir().await?;
        let raw = serde_json::to_string(items)?;
        tokio::fs::write(self.path(session), raw).await?;
        Ok(())
    }

    async fn clear(&self, session: &Uuid) -> ApiResult<()> {
        match tokio::fs::remove_file(self.path(session)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCart {
    #[serde(rename = "_id")]
    key: String,
    // JSON array of cart items.
    items: String,
    updated_at: DateTime,
}

/// Carts kept in the `Studio.Carts` collection.
#[derive(Debug, Clone)]
pub struct MongoCartStore {
    collection: Collection<StoredCart>,
    storage_name: String,
}

impl MongoCartStore {
    pub fn new(client: &Client, storage_name: impl Into<String>) -> Self {
        Self {
            collection: client.database("Studio").collection("Carts"),
            storage_name: storage_name.into(),
        }
    }

    pub async fn ping(&self, client: &Client) -> ApiResult<()> {
        client.database("Studio").run_command(doc! {"ping": 1}).await?;
        Ok(())
    }
}

impl CartStore for MongoCartStore {
    async fn load(&self, session: &Uuid) -> ApiResult<Vec<CartItem>> {
        let key = storage_key(&self.storage_name, session);
        match self.collection.find_one(doc! { "_id": key.as_str() }).await? {
            Some(stored) => Ok(parse_cart(&key, &stored.items)),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, session: &Uuid, items: &[CartItem]) -> ApiResult<()> {
        let key = storage_key(&self.storage_name, session);
        let stored = StoredCart {
            key: key.clone(),
            items: serde_json::to_string(items)?,
            updated_at: DateTime::now(),
        };
        self.collection
            .replace_one(doc! { "_id": key.as_str() }, &stored)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn clear(&self, session: &Uuid) -> ApiResult<()> {
        let key = storage_key(&self.storage_name, session);
        self.collection.delete_one(doc! { "_id": key.as_str() }).await?;
        Ok(())
    }
}

/// The configured store.
#[derive(Debug, Clone)]
pub enum CartBackend {
    File(FileCartStore),
    Mongo { store: MongoCartStore, client: Client },
}

impl CartBackend {
    pub fn name(&self) -> &'static str {
        match self {
            CartBackend::File(_) => "file",
            CartBackend::Mongo { .. } => "mongodb",
        }
    }

    /// Used by the health check.
    pub async fn check(&self) -> ApiResult<()> {
        match self {
            CartBackend::File(store) => store.ensure_dir().await,
            CartBackend::Mongo { store, client } => store.ping(client).await,
        }
    }
}

impl CartStore for CartBackend {
    async fn load(&self, session: &Uuid) -> ApiResult<Vec<CartItem>> {
        match self {
            CartBackend::File(store) => store.load(session).await,
            CartBackend::Mongo { store, .. } => store.load(session).await,
        }
    }

    async fn save(&self, session: &Uuid, items: &[CartItem]) -> ApiResult<()> {
        match self {
            CartBackend::File(store) => store.save(session, items).await,
            CartBackend::Mongo { store, .. } => store.save(session, items).await,
        }
    }

    async fn clear(&self, session: &Uuid) -> ApiResult<()> {
        match self {
            CartBackend::File(store) => store.clear(session).await,
            CartBackend::Mongo { store, .. } => store.clear(session).await,
        }
    }
}

/// Parses a cart session id taken from a URL.
pub fn parse_session(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid cart session '{}'", raw)))
}
