use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use std::error::Error;
use std::time::Duration;

/// Shared MongoDB client handle.
///
/// Created once at startup and injected into the services; the driver pools
/// connections internally, so clones share the same pool.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(10));
        client_options.server_selection_timeout = Some(Duration::from_secs(10));
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options)?;
        let mongodb = Self { client };

        // Test connection
        mongodb.ping().await?;

        Ok(mongodb)
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// Abre um handle tipado para `db_name.collection_name`
    pub fn collection<T: Send + Sync>(&self, db_name: &str, collection_name: &str) -> Collection<T> {
        self.client.database(db_name).collection(collection_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
