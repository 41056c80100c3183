// In memory implementation of the Connector port.
//
// Purpose
// - Stand in for the database and the media host in tests and local runs.
//
// Responsibilities
// - Hand out a clone of a fixed handle on every successful connect.
// - Fail every connect while toggled offline.
// - Count connection attempts so callers can assert a backend was never contacted.

use crate::shared::infrastructure::connectors::{ConnectionError, Connector};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct InMemoryConnector<THandle> {
    handle: THandle,
    offline: bool,
    attempts: AtomicUsize,
}

impl<THandle> InMemoryConnector<THandle>
where
    THandle: Clone + Send + Sync + 'static,
{
    pub fn new(handle: THandle) -> Self {
        Self {
            handle,
            offline: false,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<THandle> Connector for InMemoryConnector<THandle>
where
    THandle: Clone + Send + Sync + 'static,
{
    type Handle = THandle;

    async fn connect(&self) -> Result<THandle, ConnectionError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(ConnectionError::Unreachable("connector offline".into()));
        }
        Ok(self.handle.clone())
    }
}
