//! Shared application state handed to every handler.

use std::sync::Arc;

use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::info;

use crate::error::{GazetteError, Result};
use crate::query::QueryLimits;
use crate::storage::ArticleStore;

/// Holds the single database handle for the process lifetime.
///
/// The handle may be absent when the initial connection failed or after
/// [`AppState::close`]; handlers then fail with
/// [`GazetteError::Unavailable`].
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Option<ArticleStore>>>,
    unavailable_reason: Arc<str>,
    /// Page size policy applied to list requests.
    pub limits: QueryLimits,
}

impl AppState {
    pub fn new(store: ArticleStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(Some(store))),
            unavailable_reason: Arc::from("connection closed"),
            limits: QueryLimits::default(),
        }
    }

    /// State for a process whose database connection could not be opened.
    pub fn disconnected(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self {
            store: Arc::new(Mutex::new(None)),
            unavailable_reason: Arc::from(reason),
            limits: QueryLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Lock the store for the duration of one handler's work.
    pub async fn store(&self) -> Result<MappedMutexGuard<'_, ArticleStore>> {
        let guard = self.store.lock().await;
        MutexGuard::try_map(guard, |slot| slot.as_mut())
            .map_err(|_| GazetteError::Unavailable(self.unavailable_reason.to_string()))
    }

    /// Release the database handle. Safe to call more than once.
    pub async fn close(&self) -> Result<()> {
        let store = self.store.lock().await.take();
        if let Some(store) = store {
            store.close()?;
            info!("Database connection closed");
        }
        Ok(())
    }
}
