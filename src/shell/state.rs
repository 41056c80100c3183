use crate::shared::infrastructure::connectors::cloudinary::CloudinaryAccount;
use crate::shared::infrastructure::connectors::mongo::MongoDatabase;
use crate::shell::config::AppConfig;
use std::sync::Arc;

/// State handed to every route group: the configuration and the handles the
/// bootstrap obtained from its connectors.
pub struct AppState<TDatabase, TMediaHost> {
    pub config: Arc<AppConfig>,
    pub database: Arc<TDatabase>,
    pub media_host: Arc<TMediaHost>,
}

impl<TDatabase, TMediaHost> Clone for AppState<TDatabase, TMediaHost> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            database: self.database.clone(),
            media_host: self.media_host.clone(),
        }
    }
}

pub type ServerState = AppState<MongoDatabase, CloudinaryAccount>;
