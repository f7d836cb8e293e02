use super::prelude::*;
use crate::integrity::{gps_verification, CheckInVerification};

/// Explicit moderation re-check of a review's GPS verification.
///
/// Verifies `check_in` or, if absent, the stored check-in location
/// against the current position of the place and overwrites the GPS
/// fields of the review.
pub fn reverify_review_check_in<D: PlaceRepo + ReviewRepo>(
    db: &D,
    review_id: &str,
    check_in: Option<MapPoint>,
    max_check_in_distance: Distance,
    now: Timestamp,
) -> Result<(Review, CheckInVerification)> {
    let mut review = db.get_review(review_id)?;
    if review.deleted {
        return Err(RepoError::NotFound.into());
    }
    let place = db.get_place(review.place_id.as_str())?;
    let check_in = check_in.or_else(|| review.gps.check_in());
    let (verification, gps) = gps_verification(place.pos, check_in, max_check_in_distance);
    if review.gps != gps {
        log::info!(
            "GPS verification of review {} changed: {:?}",
            review.id,
            verification
        );
        review.gps = gps;
        review.updated_at = now;
        db.update_review(&review)?;
    }
    Ok((review, verification))
}
