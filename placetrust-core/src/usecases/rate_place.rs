use super::prelude::*;
use crate::rating::{apply_change, RatingChange, Rated};

/// Attempts of an optimistic aggregate update before giving up.
pub const MAX_AGGREGATE_UPDATE_ATTEMPTS: usize = 3;

/// Incrementally applies a rating change to the aggregate of a place.
///
/// The new aggregate is only written if the stored aggregate did not
/// change in the meantime, otherwise the update is retried from a
/// fresh read.
pub fn apply_rating_change<R: PlaceRepo>(
    repo: &R,
    place_id: &str,
    change: RatingChange,
) -> Result<RatingAggregate> {
    let mut attempt = 1;
    loop {
        let place = repo.get_place(place_id)?;
        let aggregate = apply_change(place.rating, change);
        match repo.update_rating_aggregate(place_id, Some(&place.rating), &aggregate) {
            Ok(()) => {
                log::debug!(
                    "Updated rating of place {}: {} -> {} ({:?})",
                    place_id,
                    place.rating,
                    aggregate,
                    change
                );
                return Ok(aggregate);
            }
            Err(RepoError::InvalidVersion) if attempt < MAX_AGGREGATE_UPDATE_ATTEMPTS => {
                log::debug!(
                    "Concurrent rating update of place {} (attempt {})",
                    place_id,
                    attempt
                );
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Recomputes and overwrites the aggregate of a place from its reviews.
pub fn recompute_place_rating<D: PlaceRepo + ReviewRepo>(
    db: &D,
    place_id: &str,
) -> Result<RatingAggregate> {
    let place = db.get_place(place_id)?;
    let reviews = db.active_reviews_of_place(place_id)?;
    let aggregate = place.rating_aggregate(&reviews);
    if aggregate != place.rating {
        log::info!(
            "Corrected rating of place {}: {} -> {}",
            place_id,
            place.rating,
            aggregate
        );
    }
    db.update_rating_aggregate(place_id, None, &aggregate)?;
    Ok(aggregate)
}
