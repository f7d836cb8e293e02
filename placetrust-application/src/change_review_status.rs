use super::*;
use placetrust_core::reputation::ReputationEvent;

/// Moderation of a review.
///
/// Removing a review costs its author the moderation penalty.
pub fn change_review_status(
    connections: &sqlite::Connections,
    settings: &ReviewSettings,
    review_id: &str,
    status: ReviewStatus,
) -> Result<Review> {
    let change = connections.exclusive()?.transaction(|conn| {
        usecases::change_review_status(conn, review_id, status, Timestamp::now()).map_err(
            |err| {
                warn!("Failed to change status of review {}: {}", review_id, err);
                err
            },
        )
    })?;
    if let Some(rating_change) = change.rating_change {
        post_apply_rating_change(connections, &change.review.place_id, rating_change);
    }
    if change.is_removal() {
        post_adjust_reputation(
            connections,
            &settings.reputation,
            &change.review.author_id,
            ReputationEvent::ReviewRemovedByModeration,
        );
    }
    Ok(change.review)
}
