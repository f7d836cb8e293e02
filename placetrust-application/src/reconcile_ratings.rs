use super::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Recomputes the rating aggregate of a single place from its reviews.
pub fn reconcile_place_rating(
    connections: &sqlite::Connections,
    place_id: &str,
) -> Result<RatingAggregate> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::recompute_place_rating(conn, place_id))?)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationSummary {
    /// Number of places that have been recomputed successfully
    pub processed: usize,
    /// Places that have been skipped after all retries failed
    pub failed: Vec<Id>,
    /// Resume after this place to continue an interrupted run
    pub last_processed: Option<Id>,
    pub cancelled: bool,
}

fn reconcile_place_rating_with_retries(
    connections: &sqlite::Connections,
    place_id: &Id,
    max_retries: u32,
) -> Result<RatingAggregate> {
    let mut retries = 0;
    loop {
        match reconcile_place_rating(connections, place_id.as_str()) {
            Ok(aggregate) => return Ok(aggregate),
            Err(err) if retries < max_retries => {
                retries += 1;
                warn!(
                    "Failed to reconcile rating of place {} (retry {}/{}): {}",
                    place_id, retries, max_retries, err
                );
            }
            Err(err) => return Err(err),
        }
    }
}

/// Recomputes the rating aggregates of all places in ascending id order.
///
/// Each place is recomputed in a separate transaction. A place that
/// still fails after all retries is skipped. The `cancel` flag is checked
/// between places, i.e. all places that have been processed before
/// cancellation are fully recomputed.
pub fn reconcile_all_ratings(
    connections: &sqlite::Connections,
    settings: &ReconciliationSettings,
    resume_after: Option<Id>,
    cancel: &AtomicBool,
) -> Result<ReconciliationSummary> {
    reconcile_all_ratings_until(connections, settings, resume_after, || {
        cancel.load(Ordering::Relaxed)
    })
}

fn reconcile_all_ratings_until(
    connections: &sqlite::Connections,
    settings: &ReconciliationSettings,
    resume_after: Option<Id>,
    mut is_cancelled: impl FnMut() -> bool,
) -> Result<ReconciliationSummary> {
    let batch_size = settings.batch_size.max(1);
    let mut summary = ReconciliationSummary::default();
    let mut after = resume_after;
    if let Some(id) = &after {
        info!("Resuming rating reconciliation after place {}", id);
    }
    'batches: loop {
        let place_ids = connections
            .shared()?
            .place_ids_after(after.as_ref().map(Id::as_str), batch_size)?;
        if place_ids.is_empty() {
            break;
        }
        debug!("Reconciling ratings of {} places", place_ids.len());
        for place_id in place_ids {
            if is_cancelled() {
                summary.cancelled = true;
                break 'batches;
            }
            match reconcile_place_rating_with_retries(connections, &place_id, settings.max_retries)
            {
                Ok(_) => {
                    summary.processed += 1;
                }
                Err(err) => {
                    warn!("Skipping rating reconciliation of place {}: {}", place_id, err);
                    summary.failed.push(place_id.clone());
                }
            }
            summary.last_processed = Some(place_id.clone());
            after = Some(place_id);
        }
    }
    info!(
        "Reconciled ratings of {} places ({} failed, last processed: {}){}",
        summary.processed,
        summary.failed.len(),
        summary
            .last_processed
            .as_ref()
            .map(Id::as_str)
            .unwrap_or("-"),
        if summary.cancelled { ", cancelled" } else { "" }
    );
    Ok(summary)
}
