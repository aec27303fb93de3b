//! Background reaper that sweeps expired areas on a fixed interval.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{CacheConfig, PokeCache};

/// Totals collected over a reaper's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReaperReport {
    /// Sweeps performed
    pub passes: u64,
    /// Areas deleted across all sweeps
    pub removed: u64,
}

impl PokeCache {
    /// Creates a cache and starts its reaper.
    ///
    /// The reaper stops once `shutdown` reports `true` or its sender is dropped.
    ///
    /// ```ignore
    /// let (shutdown_tx, shutdown_rx) = watch::channel(false);
    /// let (cache, reaper) = PokeCache::with_reaper(CacheConfig::default(), shutdown_rx);
    ///
    /// // ... use the cache ...
    ///
    /// let _ = shutdown_tx.send(true);
    /// let report = reaper.await?;
    /// ```
    pub fn with_reaper(
        config: CacheConfig,
        shutdown: watch::Receiver<bool>,
    ) -> (Arc<Self>, JoinHandle<ReaperReport>) {
        let cache = Arc::new(Self::with_config(config));
        let handle = cache.spawn_reaper(shutdown);
        (cache, handle)
    }

    /// Spawns the reaper for this cache on the current tokio runtime.
    ///
    /// The first sweep happens one interval after spawning. Each sweep takes
    /// the same lock as every other cache operation.
    pub fn spawn_reaper(self: &Arc<Self>, shutdown: watch::Receiver<bool>) -> JoinHandle<ReaperReport> {
        tokio::spawn(reap_loop(Arc::clone(self), shutdown))
    }
}

async fn reap_loop(cache: Arc<PokeCache>, mut shutdown: watch::Receiver<bool>) -> ReaperReport {
    let mut report = ReaperReport::default();
    if *shutdown.borrow() {
        return report;
    }

    let CacheConfig {
        ttl_seconds,
        reap_interval_seconds,
    } = cache.config().clone();
    let period = cache.config().reap_interval();

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(ttl_seconds, reap_interval_seconds, "Cache reaper started");

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }

            _ = ticker.tick() => {
                let removed = cache.reap_expired();
                report.passes += 1;
                report.removed += removed as u64;
                debug!(removed, pass = report.passes, "Reaper pass complete");
            }
        }
    }

    info!(passes = report.passes, removed = report.removed, "Cache reaper stopped");
    report
}
