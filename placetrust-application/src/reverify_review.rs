use super::*;
use placetrust_core::integrity::CheckInVerification;

/// Moderation re-check of the GPS verification of a review.
pub fn reverify_review_check_in(
    connections: &sqlite::Connections,
    settings: &ReviewSettings,
    review_id: &str,
    check_in: Option<MapPoint>,
) -> Result<(Review, CheckInVerification)> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::reverify_review_check_in(
            conn,
            review_id,
            check_in,
            settings.max_check_in_distance,
            Timestamp::now(),
        )
    })?)
}
