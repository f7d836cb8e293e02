use super::*;
use placetrust_core::rating::RatingChange;

pub fn apply_rating_change(
    connections: &sqlite::Connections,
    place_id: &str,
    change: RatingChange,
) -> Result<RatingAggregate> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::apply_rating_change(conn, place_id, change))?)
}

// Follow-up of a committed review change. A failure leaves the
// aggregate stale until the next reconciliation.
pub(crate) fn post_apply_rating_change(
    connections: &sqlite::Connections,
    place_id: &Id,
    change: RatingChange,
) {
    if let Err(err) = apply_rating_change(connections, place_id.as_str(), change) {
        error!(
            "Failed to update the rating of place {} ({:?}): {}",
            place_id, change, err
        );
    }
}
