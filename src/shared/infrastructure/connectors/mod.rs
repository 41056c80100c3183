use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("missing setting {0}")]
    MissingSetting(&'static str),

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

/// Capability to open a connection to an external backend.
///
/// The bootstrap only ever talks to backends through this trait, so tests can
/// swap a real backend for one that fails deterministically.
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Handle, ConnectionError>;
}

#[async_trait]
impl<T> Connector for Arc<T>
where
    T: Connector,
{
    type Handle = T::Handle;

    async fn connect(&self) -> Result<Self::Handle, ConnectionError> {
        (**self).connect().await
    }
}

pub mod cloudinary;
pub mod in_memory;
pub mod mongo;
