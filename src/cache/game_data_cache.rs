use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::cache::GameDataSource;
use crate::models::GameData;

/// Single-slot, time-bounded cache over a [`GameDataSource`]
///
/// Fresh data is served straight from the slot. Once the TTL has passed the
/// next caller refreshes it; if that refresh fails the previous dataset is
/// served again, and only a cache that never loaded anything reports the
/// failure. Refreshes are single-flight.
pub struct GameDataCache {
    source: Arc<dyn GameDataSource>,
    ttl: Duration,
    slot: RwLock<Option<CachedEntry>>,
    refresh_lock: Mutex<()>,
}

#[derive(Clone)]
struct CachedEntry {
    data: Arc<GameData>,
    loaded_at: Instant,
}

impl GameDataCache {
    /// Create an empty cache
    pub fn new(source: Arc<dyn GameDataSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Get the current dataset, refreshing it when expired
    pub async fn get(&self) -> Result<Arc<GameData>> {
        if let Some(data) = self.fresh().await {
            return Ok(data);
        }

        let _guard = self.refresh_lock.lock().await;

        // Someone else may have refreshed while we waited for the lock
        if let Some(data) = self.fresh().await {
            return Ok(data);
        }

        debug!("Refreshing game data from {}", self.source.name());

        match self.source.fetch().await {
            Ok(data) => {
                let data = Arc::new(data);
                *self.slot.write().await = Some(CachedEntry {
                    data: Arc::clone(&data),
                    loaded_at: Instant::now(),
                });
                info!(
                    "Loaded game data from {} ({} heroes)",
                    self.source.name(),
                    data.heroes().len()
                );
                Ok(data)
            }
            Err(e) => {
                let stale = self.slot.read().await.as_ref().cloned();

                match stale {
                    Some(entry) => {
                        warn!(
                            "Game data refresh from {} failed, serving data loaded {:?} ago: {:#}",
                            self.source.name(),
                            entry.loaded_at.elapsed(),
                            e
                        );
                        Ok(entry.data)
                    }
                    None => {
                        error!(
                            "Game data fetch from {} failed with nothing cached: {:#}",
                            self.source.name(),
                            e
                        );
                        Err(e)
                    }
                }
            }
        }
    }

    /// Current dataset without triggering a refresh, fresh or not
    pub async fn peek(&self) -> Option<Arc<GameData>> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|entry| Arc::clone(&entry.data))
    }

    async fn fresh(&self) -> Option<Arc<GameData>> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|entry| entry.loaded_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.data))
    }
}
