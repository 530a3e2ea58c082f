use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    error::AppResult,
    services::{dataset::MovieSource, Snapshot, SnapshotStats, TitleMatch},
};

/// Query defaults applied by the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySettings {
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub title_match: TitleMatch,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_top_n: 20,
            max_top_n: 100,
            title_match: TitleMatch::Partial,
        }
    }
}

impl From<&Config> for QuerySettings {
    fn from(config: &Config) -> Self {
        Self {
            default_top_n: config.default_top_n,
            max_top_n: config.max_top_n,
            title_match: config.title_match(),
        }
    }
}

impl QuerySettings {
    /// Turns the caller's `top_n` into a list size
    ///
    /// Missing means the default; non-positive maps to 0, which the engine
    /// rejects; anything above the maximum is clamped.
    pub fn resolve_top_n(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_top_n,
            Some(n) => usize::try_from(n).unwrap_or(0).min(self.max_top_n),
        }
    }
}

/// Shared application state
///
/// The current snapshot sits behind an `Arc` so handlers hold the lock only
/// long enough to clone it. Reloads swap the whole `Arc`.
#[derive(Clone)]
pub struct AppState {
    snapshot: Arc<RwLock<Arc<Snapshot>>>,
    reload_lock: Arc<Mutex<()>>,
    pub source: Arc<dyn MovieSource>,
    pub settings: QuerySettings,
}

impl AppState {
    pub fn new(snapshot: Snapshot, source: Arc<dyn MovieSource>, settings: QuerySettings) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
            reload_lock: Arc::new(Mutex::new(())),
            source,
            settings,
        }
    }

    /// Current snapshot; stays valid even if a reload replaces it meanwhile
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Atomically replaces the current snapshot
    pub async fn replace_snapshot(&self, snapshot: Snapshot) {
        *self.snapshot.write().await = Arc::new(snapshot);
    }

    /// Rebuilds from the source and swaps the result in
    ///
    /// Reloads are serialized, so a slow reload of older data cannot land
    /// after a newer one. On error the current snapshot is left untouched.
    pub async fn reload(&self) -> AppResult<SnapshotStats> {
        let _guard = self.reload_lock.lock().await;

        let snapshot = Snapshot::load(self.source.as_ref(), self.settings.title_match).await?;
        let stats = snapshot.stats();
        self.replace_snapshot(snapshot).await;

        Ok(stats)
    }
}
