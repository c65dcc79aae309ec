use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::scrape::{CheckLog, Fetcher, Gauge, Instance, WebScrapingCheck};

/// Runs every instance once per `interval` until Ctrl-C, or once if `once`.
pub async fn run<F, L, G>(
    check: Arc<WebScrapingCheck<F, L, G>>,
    instances: Vec<Instance>,
    interval: Duration,
    once: bool,
) where
    F: Fetcher + Send + Sync + 'static,
    L: CheckLog + Send + Sync + 'static,
    G: Gauge + Send + Sync + 'static,
{
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };
    run_until(check, instances, interval, once, ctrl_c).await;
}

/// Like `run`, but stops as soon as `shutdown` completes, even mid-cycle.
///
/// `shutdown` is polled for the whole lifetime of the loop so a signal that
/// arrives while a cycle is running is not lost. Checks already handed to the
/// blocking pool finish on their own.
pub async fn run_until<F, L, G, S>(
    check: Arc<WebScrapingCheck<F, L, G>>,
    instances: Vec<Instance>,
    interval: Duration,
    once: bool,
    shutdown: S,
) where
    F: Fetcher + Send + Sync + 'static,
    L: CheckLog + Send + Sync + 'static,
    G: Gauge + Send + Sync + 'static,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                log::info!("Shutdown requested, stopping");
                return;
            }
        }

        tokio::select! {
            _ = run_cycle(&check, &instances) => {}
            _ = &mut shutdown => {
                log::info!("Shutdown requested during a cycle, stopping");
                return;
            }
        }
        if once {
            return;
        }
    }
}

/// Checks all instances concurrently on the blocking pool and waits for them.
pub async fn run_cycle<F, L, G>(check: &Arc<WebScrapingCheck<F, L, G>>, instances: &[Instance])
where
    F: Fetcher + Send + Sync + 'static,
    L: CheckLog + Send + Sync + 'static,
    G: Gauge + Send + Sync + 'static,
{
    log::debug!("Checking {} instance(s)", instances.len());
    let handles: Vec<_> = instances
        .iter()
        .cloned()
        .map(|instance| {
            let check = Arc::clone(check);
            tokio::task::spawn_blocking(move || check.check(&instance))
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.await {
            log::error!("check task failed: {e}");
        }
    }
}
