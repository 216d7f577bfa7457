//! MongoDB client factory.
//!
//! [`connect`] builds a client from [`DatabaseSettings`], proves the server is
//! reachable with a `ping` inside the connect deadline and hands back a
//! [`Store`] that owns the client until [`Store::shutdown`].

use std::time::Duration;

use anyhow::{anyhow, Context};
use bookshelf_kernel::settings::DatabaseSettings;
use mongodb::{
    bson::doc,
    options::ClientOptions,
    Client, Collection, Database,
};
use serde::{de::DeserializeOwned, Serialize};

const APP_NAME: &str = "bookshelf";

/// Long-lived handle to the configured database.
///
/// Cloning is cheap; clones share the driver's connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    client: Client,
    database: Database,
    operation_timeout: Duration,
}

impl Store {
    /// Typed handle to a collection of the configured database.
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        self.database.collection(name)
    }

    /// Deadline applied to every store call made on behalf of a request.
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Close all pooled connections.
    pub async fn shutdown(self) {
        tracing::info!(target: "bookshelf-db", "shutting down MongoDB client");
        self.client.shutdown().await;
    }
}

/// Connect to MongoDB and verify the server answers within
/// `connect_timeout_ms`.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Store> {
    let connect_timeout = Duration::from_millis(settings.connect_timeout_ms);

    let mut options = ClientOptions::parse(&settings.uri)
        .await
        .with_context(|| format!("invalid MongoDB connection string '{}'", settings.uri))?;
    options.app_name = Some(APP_NAME.to_string());
    options.connect_timeout = Some(connect_timeout);
    options.server_selection_timeout = Some(connect_timeout);

    let client = Client::with_options(options).context("failed to build MongoDB client")?;
    let database = client.database(&settings.name);

    tokio::time::timeout(connect_timeout, database.run_command(doc! { "ping": 1 }))
        .await
        .map_err(|_| anyhow!("timed out after {:?} waiting for MongoDB", connect_timeout))?
        .context("MongoDB did not answer ping")?;

    tracing::info!(
        target: "bookshelf-db",
        database = %settings.name,
        "connected to MongoDB"
    );

    Ok(Store {
        client,
        database,
        operation_timeout: Duration::from_millis(settings.operation_timeout_ms),
    })
}
