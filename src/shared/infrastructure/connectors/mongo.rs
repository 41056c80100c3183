use crate::shared::infrastructure::connectors::{ConnectionError, Connector};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub uri: Option<String>,
    pub name: String,
    pub connect_timeout: Duration,
}

/// Connected MongoDB database. Clones share the client's connection pool.
#[derive(Clone, Debug)]
pub struct MongoDatabase {
    client: Client,
    database: Database,
}

impl MongoDatabase {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

pub struct MongoConnector {
    settings: DatabaseSettings,
}

impl MongoConnector {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = MongoDatabase;

    async fn connect(&self) -> Result<MongoDatabase, ConnectionError> {
        let uri = self
            .settings
            .uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(ConnectionError::MissingSetting("MONGODB_URI"))?;

        let mut options =
            ClientOptions::parse(uri)
                .await
                .map_err(|e| ConnectionError::InvalidSetting {
                    name: "MONGODB_URI",
                    reason: e.to_string(),
                })?;
        options.connect_timeout = Some(self.settings.connect_timeout);
        options.server_selection_timeout = Some(self.settings.connect_timeout);

        let client =
            Client::with_options(options).map_err(|e| ConnectionError::Unreachable(e.to_string()))?;
        let database = client.database(&self.settings.name);

        // The driver connects lazily; a ping forces a round-trip.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;

        Ok(MongoDatabase { client, database })
    }
}
