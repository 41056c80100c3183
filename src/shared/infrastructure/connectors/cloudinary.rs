use crate::shared::infrastructure::connectors::{ConnectionError, Connector};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct MediaHostSettings {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

/// Credentials of a configured Cloudinary account.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryAccount {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for CloudinaryAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryAccount")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Configures the media host account. Nothing goes over the network here: the
/// account is usable as soon as its credentials are complete.
pub struct CloudinaryConnector {
    settings: MediaHostSettings,
}

impl CloudinaryConnector {
    pub fn new(settings: MediaHostSettings) -> Self {
        Self { settings }
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConnectionError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConnectionError::MissingSetting(name))
}

#[async_trait]
impl Connector for CloudinaryConnector {
    type Handle = CloudinaryAccount;

    async fn connect(&self) -> Result<CloudinaryAccount, ConnectionError> {
        let cloud_name = required(&self.settings.cloud_name, "CLOUDINARY_NAME")?;
        if !cloud_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConnectionError::InvalidSetting {
                name: "CLOUDINARY_NAME",
                reason: format!("{cloud_name:?} contains characters outside [A-Za-z0-9_-]"),
            });
        }

        Ok(CloudinaryAccount {
            cloud_name,
            api_key: required(&self.settings.api_key, "CLOUDINARY_API_KEY")?,
            api_secret: required(&self.settings.api_secret, "CLOUDINARY_SECRET_KEY")?,
        })
    }
}
