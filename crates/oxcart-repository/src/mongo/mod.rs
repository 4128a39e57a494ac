//! MongoDB document store implementations for the catalog.

mod product_store;
mod review_store;

pub use product_store::MongoProductStore;
pub use review_store::MongoReviewStore;

use bson::doc;
use mongodb::{Client, Collection, Database};
use oxcart_config::MongoConfig;
use oxcart_core::OxcartResult;
use tracing::info;

/// Shared handle to the catalog database.
#[derive(Clone)]
pub struct CatalogStore {
    database: Database,
}

impl CatalogStore {
    /// Connects to the document store.
    pub async fn connect(config: &MongoConfig) -> OxcartResult<Self> {
        info!("Connecting to MongoDB at {}...", config.uri);

        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);

        info!("MongoDB client created for database '{}'", config.database);
        Ok(Self { database })
    }

    /// Wraps a pre-existing database handle.
    #[must_use]
    pub fn with_database(database: Database) -> Self {
        Self { database }
    }

    /// Returns a typed collection.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Checks connectivity by pinging the server.
    pub async fn health_check(&self) -> OxcartResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("database", &self.database.name())
            .finish()
    }
}
