use super::*;
use placetrust_core::{rating::RatingChange, reputation::ReputationEvent};

pub fn create_review(
    connections: &sqlite::Connections,
    settings: &ReviewSettings,
    new_review: usecases::NewReview,
) -> Result<usecases::CreatedReview> {
    let created = connections.exclusive()?.transaction(|conn| {
        usecases::create_review(
            conn,
            new_review,
            settings.max_check_in_distance,
            Timestamp::now(),
        )
        .map_err(|err| {
            warn!("Failed to create review: {}", err);
            err
        })
    })?;

    let review = &created.review;
    post_apply_rating_change(
        connections,
        &review.place_id,
        RatingChange::Created(review.rating),
    );
    post_adjust_reputation(
        connections,
        &settings.reputation,
        &review.author_id,
        ReputationEvent::ReviewCreated {
            gps_verified: review.gps.is_verified(),
        },
    );

    Ok(created)
}
