use crate::config;

use anyhow::Result;
use placetrust_application::prelude::{
    reconcile_all_ratings, ReconciliationSettings, ReconciliationSummary,
};
use placetrust_core::entities::Id;
use placetrust_db_sqlite::Connections;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Runs a single reconciliation batch that is cancelled by Ctrl-C.
pub async fn run_once(
    connections: &Connections,
    settings: ReconciliationSettings,
    resume_after: Option<Id>,
) -> Result<ReconciliationSummary> {
    let cancel = Arc::new(AtomicBool::new(false));
    let ctrl_c = tokio::spawn({
        let cancel = Arc::clone(&cancel);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Cancelling rating reconciliation after the current place");
                cancel.store(true, Ordering::Relaxed);
            }
        }
    });
    let connections = connections.clone();
    let summary = tokio::task::spawn_blocking(move || {
        reconcile_all_ratings(&connections, &settings, resume_after, &cancel)
    })
    .await?;
    ctrl_c.abort();
    Ok(summary?)
}

pub async fn run(connections: &Connections, cfg: config::Reconciliation) -> Result<()> {
    let mut interval = tokio::time::interval(cfg.task_interval_time);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Stopping recurring rating reconciliation");
                return Ok(());
            }
        }

        match run_once(connections, cfg.settings, None).await {
            Ok(summary) if summary.cancelled => {
                log::info!("Stopping recurring rating reconciliation");
                return Ok(());
            }
            Ok(summary) => {
                if !summary.failed.is_empty() {
                    log::warn!(
                        "Failed to reconcile the ratings of {} places",
                        summary.failed.len()
                    );
                }
            }
            Err(err) => {
                log::warn!("Rating reconciliation could not be run: {err}");
            }
        }
    }
}
